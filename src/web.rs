//! # DID Web
//!
//! Identifier transform between HTTPS URIs and `did:web` DIDs, and the
//! network-fetching `did:web` resolver.
//!
//! A DID such as `did:web:example.com:issuers:abc` is served from
//! `https://example.com/issuers/abc/.well-known/did.json`.
//!
//! See <https://w3c-ccg.github.io/did-method-web/>.

use crate::document::DidDocument;
use crate::error::Err;
use crate::resolve::{HttpClient, MethodResolver};
use crate::{tracerr, Result};

const SCHEME: &str = "https://";
const PREFIX: &str = "did:web:";
const WELL_KNOWN_PATH: &str = ".well-known/did.json";

/// Convert an HTTPS URI to a `did:web` DID.
///
/// A textual transform only: the scheme is stripped, every `/` becomes `:`
/// and `did:web:` is prepended. Host and path legality are not validated
/// beyond the scheme check. A trailing slash yields a trailing empty segment
/// (a trailing `:` in the DID); the segment is carried through, not
/// normalized away.
///
/// # Errors
///
/// * `Err::InvalidArgument` - The URI does not start with `https://`
///   (case-insensitive), including empty input.
pub fn uri_to_did_web(uri: &str) -> Result<String> {
    let scheme_ok = uri
        .get(..SCHEME.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(SCHEME));
    if !scheme_ok {
        tracerr!(Err::InvalidArgument, "URI must start with '{SCHEME}'");
    }
    let did_web = uri[SCHEME.len()..].replace('/', ":");
    Ok(format!("did:web:{did_web}"))
}

/// Map a `did:web` DID to the URL its document is served from.
///
/// Any `#fragment` suffix is stripped before mapping. The method-specific ID
/// is split on `:`; the first segment is the host. A single segment maps to
/// the root well-known location, further segments are joined with `/` and
/// inserted as a path before the well-known suffix.
///
/// Not a strict algebraic inverse of [`uri_to_did_web`]: it appends the fixed
/// `.well-known/did.json` suffix.
///
/// # Errors
///
/// * `Err::InvalidArgument` - The DID does not start with `did:web:`
///   (case-insensitive).
pub fn did_web_to_url(did: &str) -> Result<String> {
    let prefix_ok = did
        .get(..PREFIX.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(PREFIX));
    if !prefix_ok {
        tracerr!(Err::InvalidArgument, "invalid DID format; expected {PREFIX}");
    }

    let without_fragment = did.split('#').next().unwrap_or(did);
    let specific_id = &without_fragment[PREFIX.len()..];

    // each colon in the method-specific ID represents a path segment
    let parts: Vec<&str> = specific_id.split(':').collect();
    let host = parts[0];
    if parts.len() == 1 {
        Ok(format!("https://{host}/{WELL_KNOWN_PATH}"))
    } else {
        let path = parts[1..].join("/");
        Ok(format!("https://{host}/{path}/{WELL_KNOWN_PATH}"))
    }
}

/// Resolver for `did:web` DIDs. Maps the DID to its resolution address,
/// issues a single GET through the supplied HTTP client and parses the body
/// into a [`DidDocument`]. No caching, no retry; the fetched document is
/// trusted as-is.
#[derive(Clone, Debug, Default)]
pub struct WebResolver<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> WebResolver<C> {
    /// Create a resolver that fetches documents through the given client.
    pub const fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: HttpClient> MethodResolver for WebResolver<C> {
    async fn resolve(&self, did: &str) -> Result<DidDocument> {
        let url = did_web_to_url(did)?;
        let body = match self.client.get(&url).await {
            Ok(body) => body,
            Err(e) => tracerr!(Err::FetchFailed, "failed to fetch DID document from {url}: {e}"),
        };
        match serde_json::from_slice::<DidDocument>(&body) {
            Ok(document) => Ok(document),
            Err(e) => tracerr!(Err::InvalidDocument, "failed to deserialize DID document: {e}"),
        }
    }
}
