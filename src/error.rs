use thiserror::Error;

/// Everything the connector can show in its error line. The `Display`
/// output is the exact text rendered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("MetaMask not installed. Please install it to interact with the dapp.")]
    ProviderAbsent,
    #[error("Please connect to MetaMask.")]
    UserRejected,
    #[error("An error occurred while connecting to MetaMask.")]
    ConnectionFailed,
    /// Not a failure: the wallet switched networks under the page.
    #[error("Chain has changed. Please refresh the page.")]
    NetworkChanged,
}
