//! # Document Generation
//!
//! Builds `did:web` documents from Ed25519 key pairs, either freshly
//! generated or supplied by the caller. The generator consumes key pairs to
//! build verification methods; it never persists key material.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::document::verification_method::{
    VerificationMethod, VmRelationship, ED25519_VERIFICATION_KEY_2020,
};
use crate::document::{DidDocument, DID_CONTEXT, ED25519_2020_CONTEXT};
use crate::error::Err;
use crate::keys::{self, Ed25519KeyPair};
use crate::web::uri_to_did_web;
use crate::{tracerr, Result};

/// Source of fragments for verification method IDs, used when a key pair
/// does not carry one. Injected so tests can supply a deterministic stub.
pub trait FragmentSource {
    /// Produce a new fragment, unique with high probability.
    fn next_fragment(&self) -> String;
}

/// Default fragment source: `key-` followed by 16 random hex characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandFragment;

impl FragmentSource for RandFragment {
    fn next_fragment(&self) -> String {
        let mut bytes = [0u8; 8];
        StdRng::from_entropy().fill_bytes(&mut bytes);
        format!("key-{}", hex::encode(bytes))
    }
}

/// Generates DID documents bound to Ed25519 verification methods.
#[derive(Clone, Debug, Default)]
pub struct DocumentGenerator<F: FragmentSource = RandFragment> {
    fragments: F,
}

impl DocumentGenerator<RandFragment> {
    /// Generator minting random hex fragments.
    #[must_use]
    pub const fn new() -> Self {
        Self { fragments: RandFragment }
    }
}

impl<F: FragmentSource> DocumentGenerator<F> {
    /// Generator minting fragments from the supplied source.
    pub const fn with_fragments(fragments: F) -> Self {
        Self { fragments }
    }

    /// Generate a DID document for `uri` with a single internally generated
    /// Ed25519 key.
    ///
    /// The method is listed under `authentication` only; unlike
    /// [`generate_with_keys`](Self::generate_with_keys), `assertionMethod` is
    /// not populated in this path.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidArgument` - `uri` is not an `https://` URI.
    pub fn generate(&self, uri: &str) -> Result<DidDocument> {
        let key_pair = keys::generate_key_pair();
        let did = uri_to_did_web(uri)?;
        let vm = self.verification_method(&did, &key_pair);

        Ok(DidDocument {
            context: vec![DID_CONTEXT.to_string(), ED25519_2020_CONTEXT.to_string()],
            id: did,
            authentication: Some(vec![VmRelationship::from(&vm)]),
            verification_method: Some(vec![vm]),
            ..DidDocument::default()
        })
    }

    /// Generate a DID document for `uri` using externally supplied keys. For
    /// each key provided, a corresponding verification method is created and
    /// registered for both authentication and assertion.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidArgument` - `uri` is not an `https://` URI, or `keys`
    ///   is empty.
    pub fn generate_with_keys(&self, uri: &str, keys: &[Ed25519KeyPair]) -> Result<DidDocument> {
        if keys.is_empty() {
            tracerr!(Err::InvalidArgument, "a non-empty list of keys must be provided");
        }
        let did = uri_to_did_web(uri)?;

        let mut document = DidDocument {
            context: vec![DID_CONTEXT.to_string(), ED25519_2020_CONTEXT.to_string()],
            id: did.clone(),
            ..DidDocument::default()
        };
        for key_pair in keys {
            let vm = self.verification_method(&did, key_pair);
            document.add_verification_method(vm, true, true);
        }
        Ok(document)
    }

    // Build a verification method for a key pair, minting a fragment when the
    // pair carries none.
    fn verification_method(&self, did: &str, key_pair: &Ed25519KeyPair) -> VerificationMethod {
        let fragment = key_pair
            .fragment
            .clone()
            .unwrap_or_else(|| self.fragments.next_fragment());
        VerificationMethod {
            id: format!("{did}#{fragment}"),
            type_: ED25519_VERIFICATION_KEY_2020.to_string(),
            controller: did.to_string(),
            public_key_multibase: Some(key_pair.public_key_multibase.clone()),
            ..VerificationMethod::default()
        }
    }
}
