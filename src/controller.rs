//! Provider-agnostic mount and connect flows.
//!
//! Nothing here touches Yew or the DOM: every outcome is reported as a
//! [`SessionAction`] through a [`Dispatch`] callback, and every suspended
//! flow checks a [`ScopeToken`] before reporting.

use crate::error::WalletError;
use crate::provider::{Provider, ProviderError};
use crate::session::SessionAction;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type Dispatch = Rc<dyn Fn(SessionAction)>;

/// Lives as long as the mounted component. Results delivered after
/// [`ScopeToken::cancel`] are dropped.
#[derive(Debug, Clone)]
pub struct ScopeToken(Rc<Cell<bool>>);

impl ScopeToken {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }

    pub fn cancel(&self) {
        self.0.set(false);
    }
}

impl Default for ScopeToken {
    fn default() -> Self {
        Self::new()
    }
}

/// At most one flight at a time; the slot is released when the guard drops.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight(Rc<Cell<bool>>);

pub struct FlightGuard(Rc<Cell<bool>>);

impl SingleFlight {
    pub fn try_begin(&self) -> Option<FlightGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(FlightGuard(self.0.clone()))
    }

    #[cfg(test)]
    pub fn in_flight(&self) -> bool {
        self.0.get()
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Reports the discovery outcome. A found provider is stored in `slot`
/// before it is announced, so a connect issued right after the button is
/// enabled always finds it.
pub fn discover<P: Provider>(
    detected: Option<P>,
    slot: &RefCell<Option<P>>,
    token: &ScopeToken,
    dispatch: &Dispatch,
) -> Option<P> {
    if !token.is_active() {
        return None;
    }
    let Some(provider) = detected else {
        log::info!("Please install MetaMask!");
        dispatch(SessionAction::ProviderMissing);
        return None;
    };
    log::info!("MetaMask is available!");
    *slot.borrow_mut() = Some(provider.clone());
    dispatch(SessionAction::ProviderReady);
    Some(provider)
}

/// Loads the current chain id, then subscribes to chain changes. Returns
/// `None` when the scope ended before the listener was registered.
pub async fn watch_chain<P: Provider>(
    provider: &P,
    token: &ScopeToken,
    dispatch: Dispatch,
) -> Option<P::Subscription> {
    match provider.chain_id().await {
        Ok(chain_id) if token.is_active() => dispatch(SessionAction::ChainLoaded(chain_id)),
        Ok(_) => {}
        Err(err) => log::warn!("failed to read chain id: {}", err),
    }
    if !token.is_active() {
        log::debug!("unmounted during discovery, not subscribing");
        return None;
    }

    let handler = {
        let token = token.clone();
        Box::new(move |chain_id: String| {
            if token.is_active() {
                dispatch(SessionAction::ChainChanged(chain_id));
            }
        })
    };
    Some(provider.on_chain_changed(handler))
}

/// Maps one `eth_requestAccounts` call to exactly one session outcome.
pub async fn request_account<P: Provider>(provider: &P) -> SessionAction {
    match provider.request_accounts().await {
        Ok(accounts) => SessionAction::Connected(accounts.into_iter().next()),
        Err(ProviderError::UserRejected { .. }) => {
            log::warn!("User rejected the request.");
            SessionAction::ConnectFailed(WalletError::UserRejected)
        }
        Err(err) => {
            log::error!("{}", err);
            SessionAction::ConnectFailed(WalletError::ConnectionFailed)
        }
    }
}

/// The connect action. Ignored while another connect is outstanding.
pub async fn connect<P: Provider>(
    provider: &P,
    flight: &SingleFlight,
    token: &ScopeToken,
    dispatch: Dispatch,
) {
    let Some(_guard) = flight.try_begin() else {
        log::debug!("connect already in flight, ignoring");
        return;
    };
    dispatch(SessionAction::ConnectStarted);
    let outcome = request_account(provider).await;
    if token.is_active() {
        dispatch(outcome);
    } else {
        log::debug!("discarding connect result delivered after unmount");
    }
}
