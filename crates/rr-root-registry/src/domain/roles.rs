//! # Roles
//!
//! Owner, admin set and authorized-signer set.
//!
//! Membership sets use the swap-and-pop layout: a dense member list plus a
//! 1-based position index, giving O(1) add, remove, contains and indexed
//! access. Enumeration order is unspecified and changes on removal.

use super::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use shared_types::{is_zero_address, Address};
use std::collections::HashMap;

// =============================================================================
// ENUMERABLE SET
// =============================================================================

/// Address set with O(1) membership operations and indexed enumeration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Address>", into = "Vec<Address>")]
pub struct EnumerableSet {
    members: Vec<Address>,
    /// 1-based index into `members`.
    positions: HashMap<Address, usize>,
}

impl EnumerableSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `address`. Returns `true` if it was not already present.
    ///
    /// # Errors
    /// `ZeroAddress` for the null address.
    pub fn add(&mut self, address: Address) -> RegistryResult<bool> {
        if is_zero_address(&address) {
            return Err(RegistryError::ZeroAddress);
        }
        if self.positions.contains_key(&address) {
            return Ok(false);
        }
        self.members.push(address);
        self.positions.insert(address, self.members.len());
        Ok(true)
    }

    /// Remove `address`. Returns `true` if it was present.
    ///
    /// The last member is moved into the vacated slot.
    pub fn remove(&mut self, address: &Address) -> bool {
        let Some(position) = self.positions.remove(address) else {
            return false;
        };

        let index = position - 1;
        let last = self.members.len() - 1;
        if index != last {
            let moved = self.members[last];
            self.members[index] = moved;
            self.positions.insert(moved, position);
        }
        self.members.pop();
        true
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.positions.contains_key(address)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at `index`, if in range.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<Address> {
        self.members.get(index).copied()
    }

    /// Snapshot of all members.
    #[must_use]
    pub fn members(&self) -> Vec<Address> {
        self.members.clone()
    }

    /// Every member's recorded position points back at it and indices are dense.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.positions.len() != self.members.len() {
            return Err(format!(
                "{} positions for {} members",
                self.positions.len(),
                self.members.len()
            ));
        }
        for (i, member) in self.members.iter().enumerate() {
            match self.positions.get(member) {
                Some(&position) if position == i + 1 => {}
                other => {
                    return Err(format!(
                        "member {} at index {} has position {:?}",
                        shared_types::to_hex(member),
                        i,
                        other
                    ))
                }
            }
        }
        Ok(())
    }
}

impl PartialEq for EnumerableSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for EnumerableSet {}

impl TryFrom<Vec<Address>> for EnumerableSet {
    type Error = String;

    fn try_from(members: Vec<Address>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for member in members {
            match set.add(member) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(format!(
                        "duplicate member {}",
                        shared_types::to_hex(&member)
                    ))
                }
                Err(e) => return Err(e.to_string()),
            }
        }
        Ok(set)
    }
}

impl From<EnumerableSet> for Vec<Address> {
    fn from(set: EnumerableSet) -> Self {
        set.members
    }
}

// =============================================================================
// ROLE REGISTRY
// =============================================================================

/// Role assignments of a registry instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    /// Current owner; `None` after renunciation.
    pub owner: Option<Address>,
    /// Principals allowed to write roots directly.
    pub admins: EnumerableSet,
    /// Principals whose signatures authorize root updates.
    pub signers: EnumerableSet,
}

impl RoleRegistry {
    /// Roles for a freshly deployed registry.
    #[must_use]
    pub fn with_owner(owner: Address) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    /// True if `address` is the current owner.
    #[must_use]
    pub fn is_owner(&self, address: &Address) -> bool {
        self.owner.as_ref() == Some(address)
    }

    /// Direct write permission: owner or admin.
    #[must_use]
    pub fn can_write(&self, address: &Address) -> bool {
        self.is_owner(address) || self.admins.contains(address)
    }

    /// Signed write permission: owner or authorized signer.
    #[must_use]
    pub fn can_sign(&self, address: &Address) -> bool {
        self.is_owner(address) || self.signers.contains(address)
    }

    /// Owner-only gate.
    ///
    /// # Errors
    /// `Unauthorized(caller)` if `caller` is not the owner.
    pub fn require_owner(&self, caller: &Address) -> RegistryResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized(*caller))
        }
    }
}
