//! The uniform response envelope.

use serde::{Deserialize, Serialize};

/// Wrapper around every payload the backend returns.
///
/// `success` is reported as-is; the client does not cross-check it against
/// the HTTP status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Payload of endpoints that answer with `data: null` (deletes).
pub type Empty = Option<()>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_may_be_absent() {
        let resp: ApiResponse<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2],"timestamp":"T"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, None);
        assert_eq!(resp.error, None);
        assert_eq!(resp.timestamp, "T");
        assert_eq!(resp.into_data(), vec![1, 2]);
    }

    #[test]
    fn empty_payload_accepts_null_and_missing_data() {
        let with_null: ApiResponse<Empty> = serde_json::from_str(
            r#"{"success":true,"message":"Truck deleted successfully","data":null,"timestamp":"T"}"#,
        )
        .unwrap();
        assert_eq!(with_null.data, None);
        assert_eq!(with_null.message.as_deref(), Some("Truck deleted successfully"));

        let missing: ApiResponse<Empty> =
            serde_json::from_str(r#"{"success":true,"timestamp":"T"}"#).unwrap();
        assert_eq!(missing.data, None);
    }

    #[test]
    fn success_flag_is_not_enforced() {
        let resp: ApiResponse<Option<u8>> = serde_json::from_str(
            r#"{"success":false,"data":null,"timestamp":"T","error":"odd but 2xx"}"#,
        )
        .unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("odd but 2xx"));
    }
}
