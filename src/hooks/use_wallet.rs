use crate::config::WalletConfig;
use crate::controller::{self, Dispatch, ScopeToken, SingleFlight};
use crate::provider::{detect, ChainChangedListener, InjectedProvider};
use crate::session::{Session, SessionAction};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct UseWalletHandle {
    session: UseReducerHandle<Session>,
    connect: Callback<()>,
    disconnect: Callback<()>,
}

impl UseWalletHandle {
    pub fn connected(&self) -> bool {
        self.session.is_connected
    }

    pub fn can_connect(&self) -> bool {
        self.session.can_connect()
    }

    pub fn account_text(&self) -> String {
        self.session.account_text()
    }

    pub fn chain_id(&self) -> Option<String> {
        self.session.chain_id.clone()
    }

    pub fn error_message(&self) -> String {
        self.session.error_message()
    }

    /// Asks the wallet for account access.
    pub fn connect(&self) {
        self.connect.emit(());
    }

    /// Forgets the account locally. The wallet keeps its permission grant.
    pub fn disconnect(&self) {
        self.disconnect.emit(());
    }
}

fn dispatcher(session: &UseReducerHandle<Session>) -> Dispatch {
    let session = session.clone();
    Rc::new(move |action| session.dispatch(action))
}

#[hook]
pub fn use_wallet(config: WalletConfig) -> UseWalletHandle {
    let session = use_reducer_eq(Session::default);
    let provider = use_mut_ref(|| None::<InjectedProvider>);
    let listener = use_mut_ref(|| None::<ChainChangedListener>);
    let token = use_memo(|_| ScopeToken::new(), ());
    let flight = use_memo(|_| SingleFlight::default(), ());

    {
        let session = session.clone();
        let provider = provider.clone();
        let listener = listener.clone();
        let token = (*token).clone();
        use_effect_with_deps(
            move |_| {
                {
                    let provider = provider.clone();
                    let listener = listener.clone();
                    let token = token.clone();
                    spawn_local(async move {
                        let detected = detect(&config).await;
                        let dispatch = dispatcher(&session);
                        let Some(found) =
                            controller::discover(detected, &provider, &token, &dispatch)
                        else {
                            return;
                        };
                        let subscription = controller::watch_chain(&found, &token, dispatch).await;
                        if let Some(subscription) = subscription {
                            *listener.borrow_mut() = Some(subscription);
                        }
                    });
                }
                move || {
                    token.cancel();
                    listener.borrow_mut().take();
                    provider.borrow_mut().take();
                }
            },
            (),
        );
    }

    let connect = {
        let session = session.clone();
        let provider = provider.clone();
        let token = (*token).clone();
        let flight = (*flight).clone();
        Callback::from(move |_: ()| {
            let provider = provider.borrow().clone();
            let Some(provider) = provider else {
                log::debug!("connect requested before a provider was found");
                return;
            };
            let dispatch = dispatcher(&session);
            let token = token.clone();
            let flight = flight.clone();
            spawn_local(async move {
                controller::connect(&provider, &flight, &token, dispatch).await;
            });
        })
    };

    let disconnect = {
        let session = session.clone();
        Callback::from(move |_: ()| session.dispatch(SessionAction::Disconnect))
    };

    UseWalletHandle {
        session,
        connect,
        disconnect,
    }
}

/// A handle over a fixed session with inert actions, for rendering tests.
#[cfg(test)]
#[hook]
pub(crate) fn use_prepared_wallet(session: Session) -> UseWalletHandle {
    let session = use_reducer_eq(move || session);
    UseWalletHandle {
        session,
        connect: Callback::noop(),
        disconnect: Callback::noop(),
    }
}
