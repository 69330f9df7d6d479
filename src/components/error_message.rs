use super::MISSING_CONTEXT;
use crate::hooks::UseWalletHandle;
use yew::prelude::*;

/// Last error, shown under the controls whatever the connection state.
#[function_component]
pub fn ErrorMessage() -> Html {
    let wallet = use_context::<UseWalletHandle>().expect(MISSING_CONTEXT);
    let message = wallet.error_message();

    html! {
        <>
            if !message.is_empty() {
                <p class="errorMessage" style="color: red">{message}</p>
            }
        </>
    }
}
