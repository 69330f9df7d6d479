pub mod account_label;
pub mod chain_label;
pub mod error_message;
pub mod wallet_connector;
pub mod wallet_provider;

pub use account_label::AccountLabel;
pub use chain_label::ChainLabel;
pub use error_message::ErrorMessage;
pub use wallet_connector::WalletConnector;
pub use wallet_provider::WalletProvider;

pub(crate) const MISSING_CONTEXT: &str =
    "no wallet context found. you must wrap your components in a <WalletProvider/>";
