mod use_wallet;

pub use use_wallet::{use_wallet, UseWalletHandle};

#[cfg(test)]
pub(crate) use use_wallet::use_prepared_wallet;
