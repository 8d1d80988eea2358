//! `test-accounts`: print the mnemonic-derived test wallets.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::Dispatcher;
use crate::application::wallet::{derive_test_accounts, TestAccount};
use crate::error::Result;
use crate::port::ProcessRunner;

/// Render accounts as a JSON array indented by four spaces.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::error::Error::Json) if serialization fails.
pub fn render_accounts(accounts: &[TestAccount]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    accounts.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

impl<R: ProcessRunner> Dispatcher<R> {
    /// Derive and print the test accounts for the configured mnemonic.
    ///
    /// # Errors
    ///
    /// Fails if no mnemonic is configured, derivation fails, or output cannot
    /// be written.
    pub fn test_accounts(&self) -> Result<()> {
        let mnemonic = self.settings.require_mnemonic()?;
        let accounts = derive_test_accounts(mnemonic)?;
        self.emit(&render_accounts(&accounts)?)?;
        Ok(())
    }
}
