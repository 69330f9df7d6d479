//! The wallet capability the connector talks to.
//!
//! [`Provider`] is the seam between the UI and the injected EIP-1193 object:
//! the browser implementation lives in [`injected`], tests bring their own.

pub mod injected;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use injected::{detect, ChainChangedListener, InjectedProvider};

/// EIP-1193 code for "the user rejected the request".
pub const USER_REJECTED_REQUEST: i64 = 4001;

pub const METHOD_CHAIN_ID: &str = "eth_chainId";
pub const METHOD_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("user rejected the request: {message}")]
    UserRejected { message: String },
    #[error("provider returned error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl ProviderError {
    /// Classifies a `{ code, message }` error object raised by the provider.
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == USER_REJECTED_REQUEST {
            ProviderError::UserRejected { message }
        } else {
            ProviderError::Rpc { code, message }
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(err.to_string())
    }
}

/// Argument object of `provider.request(..)`. Neither method used here
/// takes params.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestArguments {
    pub method: &'static str,
}

impl RequestArguments {
    pub fn new(method: &'static str) -> Self {
        Self { method }
    }
}

pub fn parse_chain_id(value: Value) -> Result<String, ProviderError> {
    Ok(serde_json::from_value(value)?)
}

pub fn parse_accounts(value: Value) -> Result<Vec<String>, ProviderError> {
    Ok(serde_json::from_value(value)?)
}

/// Wallet operations the connector needs. Futures are `!Send`; everything
/// runs on the browser's single event loop.
#[allow(async_fn_in_trait)]
pub trait Provider: Clone + 'static {
    /// Unregisters its handler when dropped.
    type Subscription;

    async fn chain_id(&self) -> Result<String, ProviderError>;

    /// May suspend until the user answers the wallet's own prompt.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    fn on_chain_changed(&self, handler: Box<dyn Fn(String)>) -> Self::Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_rejection_code() {
        assert_eq!(
            ProviderError::from_code(4001, "User rejected the request."),
            ProviderError::UserRejected {
                message: "User rejected the request.".to_string()
            }
        );
        assert_eq!(
            ProviderError::from_code(-32002, "Request already pending"),
            ProviderError::Rpc {
                code: -32002,
                message: "Request already pending".to_string()
            }
        );
    }

    #[test]
    fn request_arguments_encode_method_only() {
        let encoded = serde_json::to_value(RequestArguments::new(METHOD_CHAIN_ID)).unwrap();
        assert_eq!(encoded, json!({ "method": "eth_chainId" }));
        assert_eq!(
            serde_json::to_value(RequestArguments::new(METHOD_REQUEST_ACCOUNTS)).unwrap(),
            json!({ "method": "eth_requestAccounts" })
        );
    }

    #[test]
    fn parses_responses() {
        assert_eq!(parse_chain_id(json!("0x89")).unwrap(), "0x89");
        assert_eq!(
            parse_accounts(json!(["0xABC", "0xDEF"])).unwrap(),
            vec!["0xABC".to_string(), "0xDEF".to_string()]
        );
        assert!(matches!(
            parse_accounts(json!({ "accounts": [] })),
            Err(ProviderError::InvalidResponse(_))
        ));
    }
}
