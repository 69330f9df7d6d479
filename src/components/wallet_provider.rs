use crate::config::WalletConfig;
use crate::hooks::{use_wallet, UseWalletHandle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WalletProviderProps {
    #[prop_or_default]
    pub config: WalletConfig,
    #[prop_or_default]
    pub children: Children,
}

/// Owns the wallet session and shares it with every nested component.
#[function_component]
pub fn WalletProvider(props: &WalletProviderProps) -> Html {
    let wallet = use_wallet(props.config.clone());

    html! {
        <ContextProvider<UseWalletHandle> context={wallet}>
            {for props.children.iter()}
        </ContextProvider<UseWalletHandle>>
    }
}
