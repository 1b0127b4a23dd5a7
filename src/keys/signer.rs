//! Detached signing and verification over raw Ed25519 key material.
//!
//! Operates on the raw bytes recovered from multibase-decoded key material
//! (marker bytes stripped): 64-byte keypair blobs for signing, 32-byte public
//! keys for verification.

use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};

use crate::error::Err;
use crate::keys::encode;
use crate::{tracerr, Result};

/// Sign a message with a 64-byte Ed25519 keypair blob (secret key followed by
/// public key), returning the detached signature as a multibase string.
///
/// # Errors
///
/// * `Err::InvalidArgument` - The blob is not 64 bytes or its halves are
///   inconsistent.
pub fn sign(keypair_bytes: &[u8], message: &[u8]) -> Result<String> {
    let Ok(bytes) = <&[u8; 64]>::try_from(keypair_bytes) else {
        tracerr!(
            Err::InvalidArgument,
            "expected 64 bytes of keypair material, got {}",
            keypair_bytes.len()
        );
    };
    let signing_key = match SigningKey::from_keypair_bytes(bytes) {
        Ok(key) => key,
        Err(e) => tracerr!(Err::InvalidArgument, "invalid Ed25519 keypair: {e}"),
    };
    Ok(encode(&signing_key.sign(message).to_bytes()))
}

/// Verify a detached signature over a message with a 32-byte Ed25519 public
/// key. Returns false for a well-formed but non-matching signature.
///
/// # Errors
///
/// * `Err::InvalidArgument` - The public key or signature bytes are
///   malformed.
pub fn verify(public_key: &[u8], signature: &[u8], message: &[u8]) -> Result<bool> {
    let Ok(bytes) = <&[u8; 32]>::try_from(public_key) else {
        tracerr!(
            Err::InvalidArgument,
            "expected 32 bytes of public key material, got {}",
            public_key.len()
        );
    };
    let verifying_key = match VerifyingKey::from_bytes(bytes) {
        Ok(key) => key,
        Err(e) => tracerr!(Err::InvalidArgument, "invalid Ed25519 public key: {e}"),
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        tracerr!(Err::InvalidArgument, "invalid signature length: {}", signature.len());
    };
    Ok(verifying_key.verify(message, &signature).is_ok())
}
