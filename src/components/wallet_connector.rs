use super::{AccountLabel, ChainLabel, ErrorMessage, MISSING_CONTEXT};
use crate::hooks::UseWalletHandle;
use yew::prelude::*;

#[function_component]
pub fn WalletConnector() -> Html {
    let wallet = use_context::<UseWalletHandle>().expect(MISSING_CONTEXT);

    let onconnect = {
        let wallet = wallet.clone();
        Callback::from(move |_: MouseEvent| wallet.connect())
    };
    let ondisconnect = {
        let wallet = wallet.clone();
        Callback::from(move |_: MouseEvent| wallet.disconnect())
    };

    html! {
        <>
            if wallet.connected() {
                <>
                    <AccountLabel />
                    <ChainLabel />
                    <button onclick={ondisconnect} class="disconnectButton">
                        {"Disconnect"}
                    </button>
                </>
            } else {
                <button
                    onclick={onconnect}
                    class="enableEthereumButton"
                    disabled={!wallet.can_connect()}
                >
                    {"Enable Ethereum"}
                </button>
            }
            <ErrorMessage />
        </>
    }
}
