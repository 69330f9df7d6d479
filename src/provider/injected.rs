use super::{
    parse_accounts, parse_chain_id, Provider, ProviderError, RequestArguments, METHOD_CHAIN_ID,
    METHOD_REQUEST_ACCOUNTS,
};
use crate::config::WalletConfig;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Window};

const INJECTED_KEY: &str = "ethereum";
const INITIALIZED_EVENT: &str = "ethereum#initialized";
const CHAIN_CHANGED_EVENT: &str = "chainChanged";

#[wasm_bindgen]
extern "C" {
    /// The EIP-1193 object wallets inject at `window.ethereum`.
    #[derive(Clone, Debug)]
    pub type EthereumProvider;

    #[wasm_bindgen(method, catch)]
    fn request(this: &EthereumProvider, args: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &EthereumProvider, event: &str, listener: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method, js_name = removeListener)]
    fn remove_listener(
        this: &EthereumProvider,
        event: &str,
        listener: &Closure<dyn FnMut(JsValue)>,
    );

    #[wasm_bindgen(method, getter, js_name = isMetaMask)]
    fn is_meta_mask(this: &EthereumProvider) -> Option<bool>;
}

#[derive(Clone, Debug)]
pub struct InjectedProvider {
    inner: EthereumProvider,
}

impl InjectedProvider {
    pub fn is_meta_mask(&self) -> bool {
        self.inner.is_meta_mask().unwrap_or(false)
    }

    async fn call(&self, method: &'static str) -> Result<Value, ProviderError> {
        let args = serde_json::to_string(&RequestArguments::new(method))?;
        let args = js_sys::JSON::parse(&args).map_err(js_error)?;
        let promise = self.inner.request(&args).map_err(js_error)?;
        let response = JsFuture::from(promise).await.map_err(js_error)?;
        if response.is_undefined() {
            return Ok(Value::Null);
        }
        let response = js_sys::JSON::stringify(&response).map_err(js_error)?;
        Ok(serde_json::from_str(&String::from(response))?)
    }
}

impl Provider for InjectedProvider {
    type Subscription = ChainChangedListener;

    async fn chain_id(&self) -> Result<String, ProviderError> {
        parse_chain_id(self.call(METHOD_CHAIN_ID).await?)
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        parse_accounts(self.call(METHOD_REQUEST_ACCOUNTS).await?)
    }

    fn on_chain_changed(&self, handler: Box<dyn Fn(String)>) -> ChainChangedListener {
        let closure = Closure::wrap(Box::new(move |value: JsValue| match value.as_string() {
            Some(chain_id) => handler(chain_id),
            None => log::warn!("ignoring non-string chainChanged payload: {:?}", value),
        }) as Box<dyn FnMut(JsValue)>);
        self.inner.on(CHAIN_CHANGED_EVENT, &closure);
        ChainChangedListener {
            provider: self.inner.clone(),
            closure,
        }
    }
}

/// A registered `chainChanged` listener; removed from the provider on drop.
pub struct ChainChangedListener {
    provider: EthereumProvider,
    closure: Closure<dyn FnMut(JsValue)>,
}

impl Drop for ChainChangedListener {
    fn drop(&mut self) {
        self.provider
            .remove_listener(CHAIN_CHANGED_EVENT, &self.closure);
    }
}

/// Resolves to the provider at `window.ethereum`, waiting up to
/// `config.detect_timeout_ms` for a late injection.
pub async fn detect(config: &WalletConfig) -> Option<InjectedProvider> {
    let window = web_sys::window()?;
    if injected(&window).is_none() {
        wait_for_initialization(&window, config.detect_timeout_ms).await;
    }
    let provider = injected(&window)?;
    if config.must_be_metamask && !provider.is_meta_mask() {
        log::info!("injected provider is not MetaMask");
        return None;
    }
    Some(provider)
}

fn injected(window: &Window) -> Option<InjectedProvider> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(INJECTED_KEY)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(InjectedProvider {
        inner: value.unchecked_into(),
    })
}

async fn wait_for_initialization(window: &Window, timeout_ms: u32) {
    let mut listener = None;
    let mut timeout = None;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let mut options = AddEventListenerOptions::new();
        options.once(true);
        if let Err(err) = window.add_event_listener_with_callback_and_add_event_listener_options(
            INITIALIZED_EVENT,
            &resolve,
            &options,
        ) {
            log::warn!("cannot listen for {}: {:?}", INITIALIZED_EVENT, err);
        }
        let delay = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay) {
            Ok(handle) => timeout = Some(handle),
            Err(err) => {
                log::warn!("cannot schedule detection timeout: {:?}", err);
                if let Err(err) = resolve.call0(&JsValue::NULL) {
                    log::debug!("cannot resolve detection wait: {:?}", err);
                }
            }
        }
        listener = Some(resolve);
    });
    if let Err(err) = JsFuture::from(promise).await {
        log::debug!("detection wait failed: {:?}", err);
    }
    if let Some(handle) = timeout {
        window.clear_timeout_with_handle(handle);
    }
    if let Some(resolve) = listener {
        if let Err(err) = window.remove_event_listener_with_callback(INITIALIZED_EVENT, &resolve) {
            log::debug!("cannot remove {} listener: {:?}", INITIALIZED_EVENT, err);
        }
    }
}

fn js_error(value: JsValue) -> ProviderError {
    let code = js_sys::Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64());
    let message = js_sys::Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string());
    match (code, message) {
        (Some(code), message) => {
            ProviderError::from_code(code as i64, message.unwrap_or_default())
        }
        (None, Some(message)) => ProviderError::Js(message),
        (None, None) => ProviderError::Js(format!("{:?}", value)),
    }
}
