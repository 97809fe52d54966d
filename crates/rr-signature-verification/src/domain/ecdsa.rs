//! # ECDSA Signer Recovery (secp256k1)
//!
//! Pure domain logic for recovering the address that produced a signature.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Null Signer**: Recovery must not yield the zero address
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance
//! - Uses k256 crate for cryptographic operations

use super::entities::{Address, EcdsaSignature};
use super::errors::SignatureError;
use crate::ports::inbound::SignatureVerificationApi;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{is_zero_address, to_hex, Hash};
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// ECDSA VERIFIER
// =============================================================================

/// Production implementation of [`SignatureVerificationApi`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaVerifier;

impl EcdsaVerifier {
    /// Create a new ECDSA verifier.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerificationApi for EcdsaVerifier {
    fn recover_address(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SignatureError> {
        recover_address(message_hash, signature)
    }

    fn verify_signer(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
        expected: &Address,
    ) -> Result<Address, SignatureError> {
        verify_signer(message_hash, signature, expected)
    }
}

// =============================================================================
// CORE RECOVERY FUNCTIONS
// =============================================================================

/// Recover the signer's address from a prehashed message.
///
/// Validations performed, in order:
/// 1. R and S are in [1, n-1]
/// 2. S is in the lower half of the curve order (EIP-2)
/// 3. Recovery ID (v) is 0, 1, 27 or 28
/// 4. Public key recovery succeeds
/// 5. Recovered address is not the zero address
pub fn recover_address(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }

    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    // sig_bytes is cleared on both paths
    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    let address = address_from_pubkey(&recovered_key);
    if is_zero_address(&address) {
        return Err(SignatureError::ZeroAddressRecovered);
    }

    Ok(address)
}

/// Recover the signer and check it matches `expected`.
pub fn verify_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    expected: &Address,
) -> Result<Address, SignatureError> {
    let recovered = recover_address(message_hash, signature)?;

    if recovered[..].ct_eq(&expected[..]).unwrap_u8() == 0 {
        debug!(
            expected = %to_hex(expected),
            actual = %to_hex(&recovered),
            "Recovered signer does not match claimed signer"
        );
        return Err(SignatureError::SignerMismatch {
            expected: *expected,
            actual: recovered,
        });
    }

    Ok(recovered)
}

// =============================================================================
// SIGNING
// =============================================================================

/// Parse a 32-byte secp256k1 private key.
pub fn signing_key_from_bytes(bytes: &[u8]) -> Result<SigningKey, SignatureError> {
    SigningKey::from_slice(bytes).map_err(|_| SignatureError::InvalidPrivateKey)
}

/// Sign a prehashed message for off-line submission.
///
/// The result is always low-S with `v` in {27, 28}, so it passes
/// [`recover_address`].
pub fn sign_prehash(
    message_hash: &Hash,
    signing_key: &SigningKey,
) -> Result<EcdsaSignature, SignatureError> {
    let (sig, recid) = signing_key
        .sign_prehash_recoverable(message_hash)
        .map_err(|_| SignatureError::SigningFailed)?;

    let sig_bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    // Inverting S flips the parity of R's y coordinate
    let (s, y_odd) = if is_low_s(&s) {
        (s, recid.is_y_odd())
    } else {
        (invert_s(&s), !recid.is_y_odd())
    };

    Ok(EcdsaSignature {
        r,
        s,
        v: 27 + u8::from(y_odd),
    })
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Derive Ethereum address from public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = keccak256(&pubkey_slice[1..]);

    // Take last 20 bytes as address
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Check if S value is in lower half of curve order (EIP-2 malleability protection).
///
/// Per EIP-2: S must be STRICTLY LESS THAN half_order (not equal).
/// Runs in fixed time regardless of input values.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = s[i];
        let h_byte = SECP256K1_HALF_ORDER[i];

        // less = less OR (NOT decided AND s[i] < h[i])
        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < h_byte) as u8);
        let byte_greater = Choice::from((s_byte > h_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less.into()
}

/// Check if a scalar value is in valid range [1, n-1] for ECDSA.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = scalar[i];
        let n_byte = SECP256K1_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < n_byte) as u8);
        let byte_greater = Choice::from((s_byte > n_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    let valid = !is_zero & less;
    valid.into()
}

/// Parse recovery ID from v value.
///
/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert S value: s' = n - s
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers {
    use super::*;

    /// Generate a new ECDSA keypair.
    pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let verifying_key = *signing_key.verifying_key();
        (signing_key, verifying_key)
    }

    /// Address controlled by `signing_key`.
    pub fn address_of(signing_key: &SigningKey) -> Address {
        address_from_pubkey(signing_key.verifying_key())
    }

    /// Sign a message hash, normalized to low S.
    pub fn sign(message_hash: &Hash, private_key: &SigningKey) -> EcdsaSignature {
        sign_prehash(message_hash, private_key).expect("signing failed")
    }

    /// High-S twin of a valid signature. Recovers to the same key on
    /// permissive verifiers, rejected here.
    pub fn malleate(signature: &EcdsaSignature) -> EcdsaSignature {
        EcdsaSignature {
            r: signature.r,
            s: invert_s(&signature.s),
            v: if signature.v == 27 { 28 } else { 27 },
        }
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
