//! # Errors
//!
//! Typed failure conditions for document generation, key lookup and DID
//! resolution. Every failure aborts the current operation and surfaces a
//! typed condition to the caller; nothing is logged-and-continued.

use std::fmt::Display;

use thiserror::Error;

/// Simplify creation of errors with tracing.
///
/// # Example
/// ```ignore
/// fn with_msg() -> Result<()> {
///     tracerr!(Err::InvalidArgument, "message: {}", "some message")
/// }
///
/// fn no_msg() -> Result<()> {
///     tracerr!(Err::InvalidArgument)
/// }
/// ```
#[macro_export]
macro_rules! tracerr {
    // with context
    ($code:expr, $($msg:tt)*) => {
        {
        use $crate::error::Context as _;
        tracing::error!($($msg)*);
        return Err($code).context(format!($($msg)*));
        }
    };
    // no context
    ($code:expr) => {
        {
        tracing::error!("{}", $code);
        return Err($code.into());
        }
    }
}

/// Public error type for DID Forge.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] anyhow::Error);

impl Error {
    /// Transfer the error to a JSON object suitable for HTTP error bodies.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.0.root_cause().to_string(),
            "error_description": self.to_string(),
        })
    }

    /// Returns true if `E` is the type held by this error object.
    #[must_use]
    pub fn is(&self, err: Err) -> bool {
        self.0.downcast_ref::<Err>().map_or(false, |e| e == &err)
    }
}

/// Typed errors for DID Forge.
#[derive(Clone, Copy, Error, Debug, PartialEq, Eq)]
pub enum Err {
    /// Malformed URI or DID, empty required input, or an otherwise invalid
    /// argument. Surfaced to the caller, never retried. (See context for
    /// details.)
    #[error("invalid_argument")]
    InvalidArgument,

    /// A multibase value failed strict decoding: the text does not parse as
    /// multibase or is not base58btc.
    #[error("invalid_encoding")]
    InvalidEncoding,

    /// The DID method is not registered with the resolver dispatcher. Fatal
    /// to that resolution.
    #[error("unsupported_method")]
    UnsupportedMethod,

    /// The requested key use does not name one of the five verification
    /// relationships.
    #[error("unsupported_use")]
    UnsupportedUse,

    /// No verification method with the requested ID exists in the DID
    /// document.
    #[error("not_found")]
    NotFound,

    /// The verification method exists but is not listed under the
    /// relationship matching the requested use. Distinct from
    /// [`Err::NotFound`] so callers can tell "key absent" from "key
    /// unauthorized".
    #[error("not_allowed_for_use")]
    NotAllowedForUse,

    /// A `did:web` document request failed: transport error or non-success
    /// HTTP status. No automatic retry.
    #[error("fetch_failed")]
    FetchFailed,

    /// A fetched `did:web` document body could not be parsed into the
    /// document model. No partial-document fallback.
    #[error("invalid_document")]
    InvalidDocument,
}

/// Context is used to decorate errors with useful context information.
pub trait Context<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Adds context to the error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context to add to the error.
    ///
    /// # Errors
    ///
    /// * Original error with context appended.
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static;
}

impl<T, E> Context<T, E> for core::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => Err(Error(anyhow::Error::from(e).context(context))),
        }
    }
}

impl From<Err> for Error {
    fn from(error: Err) -> Self {
        Error(error.into())
    }
}
