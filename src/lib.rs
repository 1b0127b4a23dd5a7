//! # DID Forge
//!
//! Generation and resolution of Decentralized Identifier (DID) documents for
//! the `did:web` and `did:key` methods, with Ed25519 as the supported key
//! type.
//!
//! The crate covers the protocol-level plumbing between cryptographic key
//! material and DID documents: multibase/multicodec key framing, the mapping
//! between HTTPS URIs and `did:web` identifiers, verification relationship
//! lookup rules, and method-specific resolution. Signing primitives come from
//! `ed25519-dalek` and remote documents are fetched through a pluggable
//! [`HttpClient`].
//!
//! See [DID Core](https://www.w3.org/TR/did-core/) for the data model.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod document;
pub mod error;
pub mod generate;
pub mod key;
pub mod keys;
pub mod resolve;
pub mod web;

pub use document::service::Service;
pub use document::verification_method::{
    KeyPurpose, VerificationMethod, VmRelationship, ED25519_VERIFICATION_KEY_2020,
};
pub use document::{DidDocument, OneOrMany, DID_CONTEXT, ED25519_2020_CONTEXT};
pub use generate::{DocumentGenerator, FragmentSource, RandFragment};
pub use key::KeyResolver;
pub use keys::{generate_key_pair, Ed25519KeyPair};
pub use resolve::{DidResolver, HttpClient, Method, MethodResolver, ReqwestClient};
pub use web::{did_web_to_url, uri_to_did_web, WebResolver};

/// Result type for DID Forge.
pub type Result<T, E = error::Error> = core::result::Result<T, E>;
