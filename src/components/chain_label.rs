use super::MISSING_CONTEXT;
use crate::hooks::UseWalletHandle;
use yew::prelude::*;

#[function_component]
pub fn ChainLabel() -> Html {
    let wallet = use_context::<UseWalletHandle>().expect(MISSING_CONTEXT);

    html! {
        <>
            if let Some(chain_id) = wallet.chain_id() {
                <h3>
                    {"Chain ID: "}
                    <span class="showChainId">{chain_id}</span>
                </h3>
            }
        </>
    }
}
