/// How the connector looks for the injected wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// How long to wait for `ethereum#initialized` when `window.ethereum`
    /// is missing at mount.
    pub detect_timeout_ms: u32,
    /// Reject providers that do not report `isMetaMask`.
    pub must_be_metamask: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            detect_timeout_ms: 3000,
            must_be_metamask: false,
        }
    }
}
