//! Key material handling: multicodec framing, multibase encoding and Ed25519
//! key pair generation.
//!
//! All multibase values stored in any document produced or normalized by this
//! crate are base58btc. Values arriving in another base are re-encoded before
//! they are embedded (see [`canonicalize`]).

use ed25519_dalek::SigningKey;
use multibase::Base;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::Err;
use crate::{tracerr, Result};

pub mod signer;

/// Multicodec marker for an Ed25519 public key (32 bytes of key material).
pub const ED25519_PUB_CODEC: [u8; 2] = [0xed, 0x01];

/// Multicodec marker for an Ed25519 secret key (64 bytes of key material).
pub const ED25519_SECRET_CODEC: [u8; 2] = [0x13, 0x00];

/// An Ed25519 key pair with both keys in multicodec-framed multibase form.
///
/// Transient: created by [`generate_key_pair`] or supplied by a caller, and
/// consumed once to build a verification method. This crate never stores the
/// secret key beyond the call that uses it - persistence and secure erasure
/// are the caller's responsibility.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ed25519KeyPair {
    /// Fragment to use for the verification method ID. A fresh random
    /// fragment is minted when not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    /// Multibase-encoded public key.
    pub public_key_multibase: String,
    /// Multibase-encoded secret key.
    pub secret_key_multibase: String,
}

/// Generate a new Ed25519 key pair with multibase-encoded key material.
#[must_use]
pub fn generate_key_pair() -> Ed25519KeyPair {
    let signing_key = SigningKey::generate(&mut OsRng);
    Ed25519KeyPair {
        fragment: None,
        public_key_multibase: encode_public_key(&signing_key.verifying_key().to_bytes()),
        secret_key_multibase: encode_secret_key(&signing_key.to_keypair_bytes()),
    }
}

/// Multibase-encode raw bytes using base58btc.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    multibase::encode(Base::Base58Btc, bytes)
}

/// Frame a raw Ed25519 public key with its multicodec marker and
/// multibase-encode the result.
#[must_use]
pub fn encode_public_key(key: &[u8]) -> String {
    let mut framed = ED25519_PUB_CODEC.to_vec();
    framed.extend_from_slice(key);
    encode(&framed)
}

/// Frame a raw Ed25519 secret key with its multicodec marker and
/// multibase-encode the result.
#[must_use]
pub fn encode_secret_key(key: &[u8]) -> String {
    let mut framed = ED25519_SECRET_CODEC.to_vec();
    framed.extend_from_slice(key);
    encode(&framed)
}

/// Strictly decode a base58btc multibase string to raw bytes.
///
/// # Errors
///
/// * `Err::InvalidEncoding` - The input is empty, does not parse as
///   multibase, or uses a base other than base58btc.
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let (base, bytes) = match multibase::decode(encoded) {
        Ok(decoded) => decoded,
        Err(e) => tracerr!(Err::InvalidEncoding, "invalid multibase value: {e}"),
    };
    if base != Base::Base58Btc {
        tracerr!(Err::InvalidEncoding, "expected base58btc, got base '{}'", base.code());
    }
    Ok(bytes)
}

/// Re-encode a multibase value to canonical base58btc.
///
/// Values already in base58btc are returned unchanged, as is text that does
/// not parse as multibase at all.
///
/// # Errors
///
/// * `Err::InvalidArgument` - The value parses as multibase but carries no
///   key material.
pub fn canonicalize(material: &str) -> Result<String> {
    let Ok((base, bytes)) = multibase::decode(material) else {
        return Ok(material.to_string());
    };
    if bytes.is_empty() {
        tracerr!(Err::InvalidArgument, "no key material in multibase value");
    }
    if base == Base::Base58Btc {
        Ok(material.to_string())
    } else {
        Ok(multibase::encode(Base::Base58Btc, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let bytes = vec![0x01u8, 0xff, 0x42, 0x00, 0x7f];
        let encoded = encode(&bytes);
        assert!(encoded.starts_with('z'));
        assert_eq!(decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn generated_keys_are_framed() {
        let key_pair = generate_key_pair();

        let public = decode(&key_pair.public_key_multibase).unwrap();
        assert_eq!(public.len(), 34);
        assert_eq!(public[..2], ED25519_PUB_CODEC);
        assert_eq!(public[..2], [237, 1]);

        let secret = decode(&key_pair.secret_key_multibase).unwrap();
        assert_eq!(secret.len(), 66);
        assert_eq!(secret[..2], ED25519_SECRET_CODEC);
        assert_eq!(secret[..2], [19, 0]);

        assert!(key_pair.fragment.is_none());
    }

    #[test]
    fn decode_rejects_empty_and_garbage() {
        let err = decode("").expect_err("expected error");
        assert!(err.is(Err::InvalidEncoding));

        let err = decode("z0OIl").expect_err("0, O, I, l are not base58btc");
        assert!(err.is(Err::InvalidEncoding));
    }

    #[test]
    fn decode_rejects_other_bases() {
        let base64 = multibase::encode(Base::Base64, b"some key material");
        let err = decode(&base64).expect_err("expected error");
        assert!(err.is(Err::InvalidEncoding));
    }

    #[test]
    fn canonicalize_re_encodes_other_bases() {
        let bytes = b"some key material";
        let base64 = multibase::encode(Base::Base64, bytes);
        let canonical = canonicalize(&base64).unwrap();
        assert_eq!(canonical, encode(bytes));

        // already canonical
        let base58 = encode(bytes);
        assert_eq!(canonicalize(&base58).unwrap(), base58);
    }

    #[test]
    fn canonicalize_passes_through_non_multibase() {
        // '-' is not valid in any base alphabet the leading char implies
        assert_eq!(canonicalize("key-material").unwrap(), "key-material");
    }

    #[test]
    fn canonicalize_rejects_empty_payload() {
        let err = canonicalize("z").expect_err("expected error");
        assert!(err.is(Err::InvalidArgument));
    }
}
