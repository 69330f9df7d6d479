use super::MISSING_CONTEXT;
use crate::hooks::UseWalletHandle;
use yew::prelude::*;

#[function_component]
pub fn AccountLabel() -> Html {
    let wallet = use_context::<UseWalletHandle>().expect(MISSING_CONTEXT);

    html! {
        <h2>
            {"Account: "}
            <span class="showAccount">{wallet.account_text()}</span>
        </h2>
    }
}
