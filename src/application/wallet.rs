//! Deterministic test wallets derived from a mnemonic.

use alloy_primitives::hex;
use alloy_signer_local::coins_bip39::English;
use alloy_signer_local::MnemonicBuilder;
use serde::Serialize;

use crate::error::{Error, Result};

/// Number of accounts printed by `test-accounts`.
pub const NUM_TEST_WALLETS: u32 = 10;

/// BIP-44 prefix for Ethereum accounts; the account index is appended.
pub const BASE_WALLET_PATH: &str = "m/44'/60'/0'/0/";

/// An address and its private key, both hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAccount {
    pub address: String,
    pub private_key: String,
}

/// Derive the account at `index` under [`BASE_WALLET_PATH`].
///
/// # Errors
///
/// Returns [`Error::Wallet`] if the phrase is not a valid English mnemonic.
pub fn derive_account(mnemonic: &str, index: u32) -> Result<TestAccount> {
    let signer = MnemonicBuilder::<English>::default()
        .phrase(mnemonic.trim())
        .derivation_path(format!("{BASE_WALLET_PATH}{index}"))
        .map_err(|e| Error::Wallet(e.to_string()))?
        .build()
        .map_err(|e| Error::Wallet(e.to_string()))?;

    Ok(TestAccount {
        address: signer.address().to_checksum(None),
        private_key: hex::encode_prefixed(signer.to_bytes()),
    })
}

/// Derive the first [`NUM_TEST_WALLETS`] accounts, in index order.
///
/// # Errors
///
/// Returns [`Error::Wallet`] if any derivation fails.
pub fn derive_test_accounts(mnemonic: &str) -> Result<Vec<TestAccount>> {
    (0..NUM_TEST_WALLETS)
        .map(|index| derive_account(mnemonic, index))
        .collect()
}
