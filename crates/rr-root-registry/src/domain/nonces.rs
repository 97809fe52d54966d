//! # Nonce Ledger
//!
//! Per-signer replay counters for the signature path. A signer's counter
//! starts at 0 and advances by exactly one per accepted signed write.

use super::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use shared_types::Address;
use std::collections::HashMap;

/// Next expected nonce per signer.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceLedger {
    #[serde_as(as = "Vec<(_, _)>")]
    next: HashMap<Address, u64>,
}

impl NonceLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nonce `signer` must use next.
    #[must_use]
    pub fn current(&self, signer: &Address) -> u64 {
        self.next.get(signer).copied().unwrap_or(0)
    }

    /// Verify `provided` is the expected next nonce without consuming it.
    ///
    /// # Errors
    /// `ReplayedNonce` on any mismatch, and for an exhausted counter.
    pub fn check(&self, signer: &Address, provided: u64) -> RegistryResult<()> {
        let expected = self.current(signer);
        if provided != expected || expected == u64::MAX {
            return Err(RegistryError::ReplayedNonce {
                signer: *signer,
                expected,
                provided,
            });
        }
        Ok(())
    }

    /// Advance `signer`'s counter. Call only after `check` succeeded.
    pub fn consume(&mut self, signer: &Address) {
        let counter = self.next.entry(*signer).or_insert(0);
        *counter = counter.saturating_add(1);
    }

    /// Signers that have used at least one nonce.
    #[must_use]
    pub fn signers(&self) -> usize {
        self.next.len()
    }
}
