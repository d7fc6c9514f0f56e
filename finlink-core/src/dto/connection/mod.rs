//! Connection DTOs
//!
//! Wire casing is camelCase, per the API.

use serde::{Deserialize, Serialize};

/// Payload to create a new connection to an institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConnection {
    pub login_id: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
    pub institution: InstitutionRef,
}

/// Payload to update the credentials of an existing connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConnection {
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
    pub institution: InstitutionRef,
}

/// Institution reference inside connection payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionRef {
    pub id: String,
}

/// Response shape for endpoints that answer with the id of a spawned job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_connection_serializes_camel_case() {
        let payload = NewConnection {
            login_id: "user1".to_string(),
            password: "hunter2".to_string(),
            security_code: None,
            institution: InstitutionRef {
                id: "AU00000".to_string(),
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["loginId"], "user1");
        assert_eq!(json["institution"]["id"], "AU00000");
        // Absent security code must not appear on the wire.
        assert!(json.get("securityCode").is_none());
    }

    #[test]
    fn test_security_code_included_when_set() {
        let payload = UpdateConnection {
            password: "hunter2".to_string(),
            security_code: Some("123456".to_string()),
            institution: InstitutionRef {
                id: "AU00000".to_string(),
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["securityCode"], "123456");
    }
}
