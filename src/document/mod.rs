//! DID Document and its component data structures, plus the lookup rules
//! that govern which key may be used for which purpose.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::service::Service;
use crate::document::verification_method::{KeyPurpose, VerificationMethod, VmRelationship};
use crate::error::Err;
use crate::{tracerr, Result};

pub mod service;
pub mod verification_method;

/// Base JSON-LD context for DID documents.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// JSON-LD context for the Ed25519 2020 signature suite.
pub const ED25519_2020_CONTEXT: &str = "https://w3id.org/security/suites/ed25519-2020/v1";

/// A property that may hold a single value or a list of values, serialized
/// without a wrapper either way.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// A list of values.
    Many(Vec<T>),
}

/// A DID is associated with a DID document that can be serialized into a
/// representation of the DID.
/// <https://www.w3.org/TR/did-core/>
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DidDocument {
    /// The JSON-LD context. An ordered set of context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// The DID document's unique identifier. A URI conformant with RFC3986
    /// of the form "did:{method}:{method-specific-id}". Immutable after
    /// construction.
    pub id: String,
    /// A DID subject can have multiple identifiers for different purposes, or
    /// at different times. The assertion that two or more DIDs (or other
    /// types of URI) refer to the same DID subject can be made using the
    /// alsoKnownAs property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_known_as: Option<Vec<String>>,
    /// A DID controller is an entity that is authorized to make changes to a
    /// DID document. A DID or list of DIDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<OneOrMany<String>>,
    /// A set of parameters that can be used together with a process to
    /// independently verify a proof. For example, a cryptographic public key
    /// can be used as a verification method with respect to a digital
    /// signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethod>>,
    /// Authentication methods - references to verification methods by ID or
    /// embedded verification methods. Specifies how the DID subject is
    /// authenticated for purposes such as logging into a website or engaging
    /// in challenge-response interactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Vec<VmRelationship>>,
    /// Assertion methods - references to verification methods by ID or
    /// embedded verification methods. Specifies how the DID subject is
    /// expected to express claims, such as for issuing verifiable
    /// credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_method: Option<Vec<VmRelationship>>,
    /// Key agreement methods - references to verification methods by ID or
    /// embedded verification methods. Specifies how an entity can generate
    /// encryption material to transmit confidential messages to the DID
    /// subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_agreement: Option<Vec<VmRelationship>>,
    /// Capability invocation methods - references to verification methods by
    /// ID or embedded verification methods. Specifies how the DID subject can
    /// invoke a cryptographic capability, such as authorizing an update to
    /// the DID document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_invocation: Option<Vec<VmRelationship>>,
    /// Capability delegation methods - references to verification methods by
    /// ID or embedded verification methods. Specifies how the DID subject can
    /// delegate a cryptographic capability to another party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_delegation: Option<Vec<VmRelationship>>,
    /// Services advertised by the DID subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Service>>,
}

impl DidDocument {
    // Relationship list for a key purpose, if the document has one.
    fn relationships(&self, purpose: KeyPurpose) -> Option<&[VmRelationship]> {
        match purpose {
            KeyPurpose::Authentication => self.authentication.as_deref(),
            KeyPurpose::AssertionMethod => self.assertion_method.as_deref(),
            KeyPurpose::KeyAgreement => self.key_agreement.as_deref(),
            KeyPurpose::CapabilityInvocation => self.capability_invocation.as_deref(),
            KeyPurpose::CapabilityDelegation => self.capability_delegation.as_deref(),
        }
    }

    /// Append a verification method to the document, registering it by
    /// reference under `authentication` and/or `assertionMethod` as
    /// requested.
    ///
    /// Duplicate IDs are not checked: calling twice with the same method
    /// produces duplicate list entries. Callers own idempotency.
    pub fn add_verification_method(
        &mut self,
        vm: VerificationMethod,
        allow_authentication: bool,
        allow_assertion: bool,
    ) {
        let reference = VmRelationship::from(&vm);
        self.verification_method.get_or_insert_with(Vec::new).push(vm);
        if allow_authentication {
            self.authentication.get_or_insert_with(Vec::new).push(reference.clone());
        }
        if allow_assertion {
            self.assertion_method.get_or_insert_with(Vec::new).push(reference);
        }
    }

    /// Retrieve the multibase-encoded public key for the specified key ID,
    /// verifying that the document lists the key under the relationship
    /// matching the requested use. Possessing a key is not sufficient - the
    /// document must explicitly authorize it for the intended purpose.
    ///
    /// The `allowed_use` argument is matched case-insensitively against the
    /// five relationship names.
    ///
    /// # Errors
    ///
    /// * `Err::NotFound` - No verification method with `key_id` exists, or
    ///   the method carries no multibase key.
    /// * `Err::UnsupportedUse` - `allowed_use` is not a relationship name.
    /// * `Err::NotAllowedForUse` - The key exists but is not listed under the
    ///   requested relationship.
    pub fn public_key_multibase_for_use(&self, key_id: &str, allowed_use: &str) -> Result<String> {
        let vm = self
            .verification_method
            .as_ref()
            .and_then(|vms| vms.iter().find(|vm| vm.id == key_id));
        let Some(vm) = vm else {
            tracerr!(Err::NotFound, "key with ID '{key_id}' not found in the DID document");
        };

        let purpose = KeyPurpose::from_str(allowed_use)?;
        let allowed = self
            .relationships(purpose)
            .map_or(false, |entries| entries.iter().any(|entry| entry.key_id() == key_id));
        if !allowed {
            tracerr!(
                Err::NotAllowedForUse,
                "key with ID '{key_id}' is not allowed for use '{allowed_use}'"
            );
        }

        match &vm.public_key_multibase {
            Some(key) => Ok(key.clone()),
            None => tracerr!(
                Err::NotFound,
                "verification method '{key_id}' has no multibase public key"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::verification_method::ED25519_VERIFICATION_KEY_2020;

    const DID: &str = "did:web:example.com:issuers:abc";
    const KEY_ID: &str = "did:web:example.com:issuers:abc#key-1";
    const MULTIBASE: &str = "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";

    fn default_vm() -> VerificationMethod {
        VerificationMethod {
            id: KEY_ID.to_string(),
            type_: ED25519_VERIFICATION_KEY_2020.to_string(),
            controller: DID.to_string(),
            public_key_multibase: Some(MULTIBASE.to_string()),
            ..VerificationMethod::default()
        }
    }

    fn default_doc() -> DidDocument {
        DidDocument {
            context: vec![DID_CONTEXT.to_string(), ED25519_2020_CONTEXT.to_string()],
            id: DID.to_string(),
            verification_method: Some(vec![default_vm()]),
            authentication: Some(vec![VmRelationship::Reference(KEY_ID.to_string())]),
            assertion_method: Some(vec![VmRelationship::Reference(KEY_ID.to_string())]),
            ..DidDocument::default()
        }
    }

    #[test]
    fn default_doc_is_empty() {
        let doc = DidDocument::default();
        assert_eq!(doc.id, "");
        assert!(doc.context.is_empty());
        assert!(doc.controller.is_none());
        assert!(doc.also_known_as.is_none());
        assert!(doc.verification_method.is_none());
        assert!(doc.authentication.is_none());
        assert!(doc.assertion_method.is_none());
        assert!(doc.key_agreement.is_none());
        assert!(doc.capability_invocation.is_none());
        assert!(doc.capability_delegation.is_none());
        assert!(doc.service.is_none());
    }

    #[test]
    fn key_for_use() {
        let doc = default_doc();
        let key = doc
            .public_key_multibase_for_use(KEY_ID, "authentication")
            .expect("expected authentication key");
        assert_eq!(key, MULTIBASE);

        let key = doc
            .public_key_multibase_for_use(KEY_ID, "AssertionMethod")
            .expect("use matching should be case-insensitive");
        assert_eq!(key, MULTIBASE);
    }

    #[test]
    fn key_for_use_unknown_key() {
        let doc = default_doc();
        let err = doc
            .public_key_multibase_for_use("did:web:example.com#other", "authentication")
            .expect_err("expected error");
        assert!(err.is(Err::NotFound));
    }

    #[test]
    fn key_for_use_not_allowed() {
        let doc = default_doc();
        let err = doc
            .public_key_multibase_for_use(KEY_ID, "keyAgreement")
            .expect_err("expected error");
        assert!(err.is(Err::NotAllowedForUse));
    }

    #[test]
    fn key_for_use_unsupported_use() {
        let doc = default_doc();
        let err = doc
            .public_key_multibase_for_use(KEY_ID, "signing")
            .expect_err("expected error");
        assert!(err.is(Err::UnsupportedUse));
    }

    #[test]
    fn key_for_use_embedded_entry() {
        let mut doc = default_doc();
        doc.key_agreement = Some(vec![VmRelationship::Embedded(Box::new(default_vm()))]);
        let key = doc
            .public_key_multibase_for_use(KEY_ID, "keyAgreement")
            .expect("embedded entries should match by ID");
        assert_eq!(key, MULTIBASE);
    }

    #[test]
    fn add_verification_method_registers_references() {
        let mut doc = DidDocument {
            context: vec![DID_CONTEXT.to_string()],
            id: DID.to_string(),
            ..DidDocument::default()
        };
        doc.add_verification_method(default_vm(), true, true);

        assert_eq!(doc.verification_method.as_ref().unwrap().len(), 1);
        assert_eq!(
            doc.authentication,
            Some(vec![VmRelationship::Reference(KEY_ID.to_string())])
        );
        assert_eq!(
            doc.assertion_method,
            Some(vec![VmRelationship::Reference(KEY_ID.to_string())])
        );

        // duplicates are the caller's problem
        doc.add_verification_method(default_vm(), true, false);
        assert_eq!(doc.verification_method.as_ref().unwrap().len(), 2);
        assert_eq!(doc.authentication.as_ref().unwrap().len(), 2);
        assert_eq!(doc.assertion_method.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn serialize_omits_absent_fields() {
        let doc = default_doc();
        let json = serde_json::to_value(&doc).expect("failed to serialize");

        assert_eq!(json["@context"][0], DID_CONTEXT);
        assert_eq!(json["id"], DID);
        assert_eq!(json["verificationMethod"][0]["publicKeyMultibase"], MULTIBASE);
        assert_eq!(json["authentication"][0], KEY_ID);

        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("controller"));
        assert!(!obj.contains_key("alsoKnownAs"));
        assert!(!obj.contains_key("keyAgreement"));
        assert!(!obj.contains_key("service"));

        let vm = json["verificationMethod"][0].as_object().unwrap();
        assert!(!vm.contains_key("publicKeyJwk"));
    }

    #[test]
    fn deserialize_remote_document() {
        // relationship lists may reference methods the document does not
        // embed; that only errors at use-time lookup
        let doc: DidDocument = serde_json::from_value(json!({
            "@context": [DID_CONTEXT],
            "id": "did:web:example.com",
            "controller": "did:web:controller.example.com",
            "authentication": ["did:web:example.com#external"],
            "service": [{
                "id": "did:web:example.com#vcs",
                "type": "VerifiableCredentialService",
                "serviceEndpoint": "https://example.com/vc/"
            }]
        }))
        .expect("failed to deserialize");

        assert_eq!(
            doc.controller,
            Some(OneOrMany::One("did:web:controller.example.com".to_string()))
        );
        assert!(doc.verification_method.is_none());
        let err = doc
            .public_key_multibase_for_use("did:web:example.com#external", "authentication")
            .expect_err("expected error");
        assert!(err.is(Err::NotFound));
    }

    #[test]
    fn controller_one_or_many() {
        let doc: DidDocument = serde_json::from_value(json!({
            "@context": [DID_CONTEXT],
            "id": "did:web:example.com",
            "controller": ["did:web:a.example.com", "did:web:b.example.com"]
        }))
        .unwrap();
        assert_eq!(
            doc.controller,
            Some(OneOrMany::Many(vec![
                "did:web:a.example.com".to_string(),
                "did:web:b.example.com".to_string()
            ]))
        );
    }
}
