//! In-memory connection state of the current page load.

use crate::error::WalletError;
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderStatus {
    #[default]
    Detecting,
    Ready,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub account: Option<String>,
    pub chain_id: Option<String>,
    pub is_connected: bool,
    /// An `eth_requestAccounts` call is outstanding.
    pub connecting: bool,
    pub provider: ProviderStatus,
    pub error: Option<WalletError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    ProviderReady,
    ProviderMissing,
    /// Result of the `eth_chainId` query at mount.
    ChainLoaded(String),
    /// Delivered by the provider's `chainChanged` notification.
    ChainChanged(String),
    ConnectStarted,
    Connected(Option<String>),
    ConnectFailed(WalletError),
    Disconnect,
}

impl Session {
    pub fn error_message(&self) -> String {
        self.error.map(|err| err.to_string()).unwrap_or_default()
    }

    /// Text shown after "Account:"; falls back to the error line when the
    /// provider handed back no address.
    pub fn account_text(&self) -> String {
        match &self.account {
            Some(account) => account.clone(),
            None => self.error_message(),
        }
    }

    pub fn can_connect(&self) -> bool {
        self.provider == ProviderStatus::Ready && !self.connecting && !self.is_connected
    }

    /// Returns the next state, or `None` when `action` changes nothing.
    pub fn apply(&self, action: SessionAction) -> Option<Session> {
        let mut next = self.clone();
        match action {
            SessionAction::ProviderReady => next.provider = ProviderStatus::Ready,
            SessionAction::ProviderMissing => {
                next.provider = ProviderStatus::Absent;
                next.error = Some(WalletError::ProviderAbsent);
            }
            SessionAction::ChainLoaded(chain_id) => next.chain_id = Some(chain_id),
            SessionAction::ChainChanged(chain_id) => {
                if self.chain_id.as_deref() == Some(chain_id.as_str()) {
                    return None;
                }
                next.chain_id = Some(chain_id);
                next.error = Some(WalletError::NetworkChanged);
            }
            SessionAction::ConnectStarted => next.connecting = true,
            SessionAction::Connected(account) => {
                next.account = account;
                next.is_connected = true;
                next.connecting = false;
            }
            SessionAction::ConnectFailed(err) => {
                next.connecting = false;
                next.error = Some(err);
            }
            SessionAction::Disconnect => {
                next.account = None;
                next.is_connected = false;
                next.error = None;
            }
        }
        (next != *self).then_some(next)
    }
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match self.apply(action) {
            Some(next) => Rc::new(next),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(chain_id: &str) -> Session {
        Session {
            chain_id: Some(chain_id.to_string()),
            provider: ProviderStatus::Ready,
            ..Session::default()
        }
    }

    fn connected(account: &str, chain_id: &str) -> Session {
        Session {
            account: Some(account.to_string()),
            is_connected: true,
            ..ready(chain_id)
        }
    }

    #[test]
    fn missing_provider_is_reported() {
        let session = Session::default()
            .apply(SessionAction::ProviderMissing)
            .unwrap();
        assert_eq!(session.provider, ProviderStatus::Absent);
        assert_eq!(
            session.error_message(),
            "MetaMask not installed. Please install it to interact with the dapp."
        );
        assert!(!session.can_connect());
        assert!(!session.is_connected);
    }

    #[test]
    fn connect_stores_first_account() {
        let session = ready("0x1")
            .apply(SessionAction::ConnectStarted)
            .unwrap()
            .apply(SessionAction::Connected(Some("0xABC".to_string())))
            .unwrap();
        assert_eq!(session.account.as_deref(), Some("0xABC"));
        assert!(session.is_connected);
        assert!(!session.connecting);
        assert_eq!(session.chain_id.as_deref(), Some("0x1"));
        assert_eq!(session.account_text(), "0xABC");
    }

    #[test]
    fn rejected_connect_prompts_user() {
        let session = ready("0x1")
            .apply(SessionAction::ConnectStarted)
            .unwrap()
            .apply(SessionAction::ConnectFailed(WalletError::UserRejected))
            .unwrap();
        assert_eq!(session.account, None);
        assert!(!session.is_connected);
        assert_eq!(session.error_message(), "Please connect to MetaMask.");
        assert!(session.can_connect());
    }

    #[test]
    fn failure_overwrites_previous_error() {
        let session = Session {
            error: Some(WalletError::UserRejected),
            ..ready("0x1")
        };
        let session = session
            .apply(SessionAction::ConnectFailed(WalletError::ConnectionFailed))
            .unwrap();
        assert_eq!(
            session.error_message(),
            "An error occurred while connecting to MetaMask."
        );
    }

    #[test]
    fn success_keeps_previous_error() {
        let session = Session {
            error: Some(WalletError::UserRejected),
            ..ready("0x1")
        };
        let session = session
            .apply(SessionAction::Connected(Some("0xABC".to_string())))
            .unwrap();
        assert_eq!(session.error, Some(WalletError::UserRejected));
    }

    #[test]
    fn chain_change_updates_once() {
        let session = connected("0xABC", "0x1")
            .apply(SessionAction::ChainChanged("0x89".to_string()))
            .unwrap();
        assert_eq!(session.chain_id.as_deref(), Some("0x89"));
        assert_eq!(
            session.error_message(),
            "Chain has changed. Please refresh the page."
        );
        assert_eq!(
            session.apply(SessionAction::ChainChanged("0x89".to_string())),
            None
        );
    }

    #[test]
    fn duplicate_chain_change_keeps_same_rc() {
        let session = Rc::new(ready("0x1"));
        let reduced = session
            .clone()
            .reduce(SessionAction::ChainChanged("0x1".to_string()));
        assert!(Rc::ptr_eq(&session, &reduced));
    }

    #[test]
    fn chain_shown_is_latest_observed() {
        let session = Session::default()
            .apply(SessionAction::ProviderReady)
            .unwrap()
            .apply(SessionAction::ChainLoaded("0x1".to_string()))
            .unwrap()
            .apply(SessionAction::ChainChanged("0x5".to_string()))
            .unwrap()
            .apply(SessionAction::ChainChanged("0x89".to_string()))
            .unwrap();
        assert_eq!(session.chain_id.as_deref(), Some("0x89"));
    }

    #[test]
    fn disconnect_clears_local_state_only() {
        let session = Session {
            error: Some(WalletError::NetworkChanged),
            ..connected("0xABC", "0x1")
        };
        let session = session.apply(SessionAction::Disconnect).unwrap();
        assert_eq!(session.account, None);
        assert!(!session.is_connected);
        assert_eq!(session.error_message(), "");
        assert_eq!(session.chain_id.as_deref(), Some("0x1"));
        assert_eq!(session.provider, ProviderStatus::Ready);
    }

    #[test]
    fn disconnect_is_idempotent() {
        let session = ready("0x1");
        assert_eq!(session.apply(SessionAction::Disconnect), None);
        assert_eq!(Session::default().apply(SessionAction::Disconnect), None);
    }

    #[test]
    fn account_text_falls_back_to_error() {
        let session = Session {
            error: Some(WalletError::NetworkChanged),
            ..ready("0x1")
        }
        .apply(SessionAction::Connected(None))
        .unwrap();
        assert!(session.is_connected);
        assert_eq!(
            session.account_text(),
            "Chain has changed. Please refresh the page."
        );
    }

    #[test]
    fn cannot_connect_while_detecting_or_pending() {
        assert!(!Session::default().can_connect());
        let pending = ready("0x1").apply(SessionAction::ConnectStarted).unwrap();
        assert!(!pending.can_connect());
        assert!(!connected("0xABC", "0x1").can_connect());
    }
}
