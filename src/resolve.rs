//! # DID Resolution
//!
//! Method routing and the HTTP seam used by network-fetching methods. The
//! route table is built once and read-only thereafter, so a [`DidResolver`]
//! can be shared across callers without synchronization.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::document::DidDocument;
use crate::error::Err;
use crate::key::KeyResolver;
use crate::web::WebResolver;
use crate::{tracerr, Result};

/// DID methods supported by this crate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Method {
    /// `did:key`
    #[default]
    Key,

    /// `did:web`
    Web,
}

impl FromStr for Method {
    type Err = crate::error::Error;

    /// Parse a method segment into a [`Method`].
    ///
    /// # Errors
    ///
    /// * `Err::UnsupportedMethod` - The segment does not name a registered
    ///   method.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "key" => Ok(Self::Key),
            "web" => Ok(Self::Web),
            _ => tracerr!(Err::UnsupportedMethod, "DID method '{s}' is not supported"),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Web => write!(f, "web"),
        }
    }
}

/// Extract and parse the method segment of a DID string - the token between
/// the first and second colon.
///
/// # Errors
///
/// * `Err::InvalidArgument` - The string is not `did:`-rooted or has no
///   method segment.
/// * `Err::UnsupportedMethod` - The method is not registered.
pub fn method_of(did: &str) -> Result<Method> {
    let mut parts = did.splitn(3, ':');
    if parts.next() != Some("did") {
        tracerr!(Err::InvalidArgument, "DID must start with 'did:'");
    }
    let Some(method) = parts.next() else {
        tracerr!(Err::InvalidArgument, "DID is missing a method segment");
    };
    Method::from_str(method)
}

/// HTTP GET seam for resolvers that fetch remote documents. Implementations
/// own transport concerns: timeouts, redirects and TLS configuration.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Fetch the body served at `url`. A non-success status is an error.
    async fn get(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}

/// Default [`HttpClient`] backed by `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client with default transport configuration.
    #[must_use]
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            anyhow::bail!("request returned status {}", response.status());
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Capability implemented by each DID method resolver: resolve a DID to its
/// document.
#[allow(async_fn_in_trait)]
pub trait MethodResolver {
    /// Resolve a DID to a DID document.
    ///
    /// # Errors
    ///
    /// Returns a typed error when the DID is malformed for the method or the
    /// document cannot be produced.
    async fn resolve(&self, did: &str) -> Result<DidDocument>;
}

/// Routes a DID to the resolver registered for its method segment. Dispatch
/// is a pure lookup with no retry or fallback; concurrent resolutions are
/// independent.
#[derive(Clone, Debug)]
pub struct DidResolver<C: HttpClient = ReqwestClient> {
    key: KeyResolver,
    web: WebResolver<C>,
}

impl DidResolver<ReqwestClient> {
    /// Resolver dispatching `did:key` locally and `did:web` over `reqwest`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(ReqwestClient::new())
    }
}

impl Default for DidResolver<ReqwestClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> DidResolver<C> {
    /// Resolver fetching `did:web` documents through the supplied client.
    pub const fn with_client(client: C) -> Self {
        Self {
            key: KeyResolver,
            web: WebResolver::new(client),
        }
    }

    /// Resolve a DID using the resolver registered for its method.
    ///
    /// # Errors
    ///
    /// * `Err::InvalidArgument` / `Err::UnsupportedMethod` - The DID string
    ///   cannot be routed.
    /// * Method-specific errors from the routed resolver.
    pub async fn resolve(&self, did: &str) -> Result<DidDocument> {
        match method_of(did)? {
            Method::Key => self.key.resolve(did).await,
            Method::Web => self.web.resolve(did).await,
        }
    }
}
