use crate::components::{WalletConnector, WalletProvider};
use yew::prelude::*;

#[function_component]
pub fn App() -> Html {
    html! {
        <div class="App">
            <WalletProvider>
                <WalletConnector />
            </WalletProvider>
        </div>
    }
}
