//! Services express ways of communicating with the DID subject or associated
//! entities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A service advertised by a DID document. Can be any type of service the DID
/// subject wants to advertise, including decentralized identity management
/// services for further discovery, authentication, authorization, or
/// interaction. Carried through document generation and resolution untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    /// Identifier for the service. A URI.
    pub id: String,
    /// The type of service.
    #[serde(rename = "type")]
    pub type_: String,
    /// The service endpoint: a URL string or a structured value.
    pub service_endpoint: Value,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn endpoint_string_or_structured() {
        let svc: Service = serde_json::from_value(json!({
            "id": "did:example:123#vcs",
            "type": "VerifiableCredentialService",
            "serviceEndpoint": "https://example.com/vc/"
        }))
        .unwrap();
        assert_eq!(svc.service_endpoint, json!("https://example.com/vc/"));

        let svc: Service = serde_json::from_value(json!({
            "id": "did:example:123#hub",
            "type": "IdentityHub",
            "serviceEndpoint": {"instances": ["https://hub.example.com/"]}
        }))
        .unwrap();
        assert_eq!(svc.service_endpoint["instances"][0], "https://hub.example.com/");
    }
}
