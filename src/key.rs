//! # DID Key
//!
//! The `did:key` method encodes the public key material in the DID itself,
//! so resolution is a pure, local expansion of the key into a document. No
//! network access; deterministic and side-effect free.
//!
//! See <https://w3c-ccg.github.io/did-method-key>.

use crate::document::verification_method::{
    VerificationMethod, VmRelationship, ED25519_VERIFICATION_KEY_2020,
};
use crate::document::{DidDocument, DID_CONTEXT, ED25519_2020_CONTEXT};
use crate::error::Err;
use crate::keys;
use crate::resolve::MethodResolver;
use crate::{tracerr, Result};

const PREFIX: &str = "did:key:";

/// Resolver for `did:key` DIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyResolver;

impl KeyResolver {
    /// Expand a `did:key` DID into a document.
    ///
    /// The key material after the prefix is normalized to base58btc when it
    /// arrives in a different multibase base. The synthetic verification
    /// method repeats the key material as its fragment and is listed under
    /// `authentication`.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidArgument` - The DID does not start with `did:key:`
    ///   (case-insensitive), or no key material follows the prefix.
    pub fn expand(did: &str) -> Result<DidDocument> {
        let prefix_ok = did
            .get(..PREFIX.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(PREFIX));
        if !prefix_ok {
            tracerr!(Err::InvalidArgument, "invalid DID format; expected {PREFIX}");
        }

        let material = did[PREFIX.len()..].trim();
        if material.is_empty() {
            tracerr!(
                Err::InvalidArgument,
                "no key material found in DID; expected did:key:<key-material>"
            );
        }
        let material = keys::canonicalize(material)?;

        let vm_id = format!("{did}#{material}");
        let vm = VerificationMethod {
            id: vm_id.clone(),
            type_: ED25519_VERIFICATION_KEY_2020.to_string(),
            controller: did.to_string(),
            public_key_multibase: Some(material),
            ..VerificationMethod::default()
        };

        Ok(DidDocument {
            context: vec![DID_CONTEXT.to_string(), ED25519_2020_CONTEXT.to_string()],
            id: did.to_string(),
            verification_method: Some(vec![vm]),
            authentication: Some(vec![VmRelationship::Reference(vm_id)]),
            ..DidDocument::default()
        })
    }
}

impl MethodResolver for KeyResolver {
    async fn resolve(&self, did: &str) -> Result<DidDocument> {
        Self::expand(did)
    }
}
