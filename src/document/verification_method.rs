//! Verification methods allow public keys to be associated with a DID.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Err;
use crate::{tracerr, Result};

/// Verification method type for Ed25519 public keys in multibase form. The
/// only type produced by this crate.
pub const ED25519_VERIFICATION_KEY_2020: &str = "Ed25519VerificationKey2020";

/// A DID document can express verification methods, such as cryptographic
/// public keys, which can be used to authenticate or authorize interactions
/// with the DID subject or associated parties.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationMethod {
    /// Identifier for the verification method. Takes the form
    /// `{did}#{fragment}` and must be unique within the document.
    pub id: String,
    /// The type of verification method. One that is registered in a DID
    /// specification registry.
    /// <https://www.w3.org/TR/did-spec-registries/>
    #[serde(rename = "type")]
    pub type_: String,
    /// Identifier for the controller of the verification method. A DID.
    pub controller: String,
    /// The public key material of the verification method as a multibase
    /// string, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
    /// The public key material of the verification method in JWK form, if
    /// applicable. Mutually exclusive with `public_key_multibase`; this crate
    /// only ever populates the multibase form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<String>,
}

/// Key purpose type. Names the verification relationship a key is authorized
/// for.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyPurpose {
    #[default]
    /// The authentication verification relationship is used to specify how
    /// the DID subject is expected to be authenticated, for purposes such as
    /// logging into a website or engaging in any sort of challenge-response
    /// protocol.
    Authentication,
    /// The assertionMethod verification relationship is used to specify how
    /// the DID subject is expected to express claims, such as for the
    /// purposes of issuing a Verifiable Credential.
    AssertionMethod,
    /// The keyAgreement verification relationship is used to specify how an
    /// entity can generate encryption material in order to transmit
    /// confidential information intended for the DID subject.
    KeyAgreement,
    /// The capabilityInvocation verification relationship is used to specify
    /// a verification method that might be used by the DID subject to invoke
    /// a cryptographic capability, such as the authorization to update the
    /// DID Document.
    CapabilityInvocation,
    /// The capabilityDelegation verification relationship is used to specify
    /// a mechanism that might be used by the DID subject to delegate a
    /// cryptographic capability to another party.
    CapabilityDelegation,
}

impl Display for KeyPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyPurpose::Authentication => write!(f, "authentication"),
            KeyPurpose::AssertionMethod => write!(f, "assertionMethod"),
            KeyPurpose::KeyAgreement => write!(f, "keyAgreement"),
            KeyPurpose::CapabilityInvocation => write!(f, "capabilityInvocation"),
            KeyPurpose::CapabilityDelegation => write!(f, "capabilityDelegation"),
        }
    }
}

impl FromStr for KeyPurpose {
    type Err = crate::error::Error;

    /// Parse a key purpose from a relationship name, case-insensitively.
    ///
    /// # Errors
    ///
    /// * `Err::UnsupportedUse` - The string does not name one of the five
    ///   verification relationships.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "authentication" => Ok(Self::Authentication),
            "assertionmethod" => Ok(Self::AssertionMethod),
            "keyagreement" => Ok(Self::KeyAgreement),
            "capabilityinvocation" => Ok(Self::CapabilityInvocation),
            "capabilitydelegation" => Ok(Self::CapabilityDelegation),
            _ => tracerr!(Err::UnsupportedUse, "use '{s}' is not supported"),
        }
    }
}

/// A reference to a verification method or an embedded verification method
/// object, as used by the "authentication" and other relationship fields in a
/// [`DidDocument`](crate::DidDocument).
///
/// Serializes to a plain string for references and to an object for embedded
/// methods.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VmRelationship {
    /// Key identifier referring to a verification method elsewhere in the
    /// DID document.
    Reference(String),
    /// Embedded, self-contained verification method object.
    Embedded(Box<VerificationMethod>),
}

impl VmRelationship {
    /// The effective key identifier of the entry, regardless of whether it is
    /// a reference or an embedded method.
    #[must_use]
    pub fn key_id(&self) -> &str {
        match self {
            Self::Reference(id) => id,
            Self::Embedded(vm) => &vm.id,
        }
    }
}

/// Convert a verification method into a relationship entry. Note that this
/// only picks up the ID of the verification method to refer to and does *not*
/// embed the verification method itself. If your implementation uses embedded
/// keys, build the entry manually.
impl From<&VerificationMethod> for VmRelationship {
    fn from(vm: &VerificationMethod) -> Self {
        Self::Reference(vm.id.clone())
    }
}
