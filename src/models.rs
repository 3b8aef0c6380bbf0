use serde::{Deserialize, Serialize};

/// Gmail label kind as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    System,
    User,
}

impl LabelType {
    /// Map the provider's `type` field; anything that is not "system" is a
    /// user label, matching how the original front end buckets labels.
    pub fn from_provider(raw: Option<&str>) -> Self {
        match raw {
            Some("system") => LabelType::System,
            _ => LabelType::User,
        }
    }
}

/// One label entry in the `/api/labels` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub label_type: LabelType,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsResponse {
    pub labels: Vec<LabelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStartResponse {
    pub auth_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Search criteria accepted by `/api/search`
///
/// All fields are optional; absent criteria widen the search. Label ids and
/// dates are forwarded to the provider verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub label_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: usize,
    pub query: String,
    pub message_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub message_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_count: usize,
    pub total_count: usize,
}

/// JSON body for every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_type_from_provider() {
        assert_eq!(LabelType::from_provider(Some("system")), LabelType::System);
        assert_eq!(LabelType::from_provider(Some("user")), LabelType::User);
        assert_eq!(LabelType::from_provider(None), LabelType::User);
    }

    #[test]
    fn test_label_entry_serializes_type_field() {
        let entry = LabelEntry {
            id: "INBOX".to_string(),
            name: "INBOX".to_string(),
            label_type: LabelType::System,
            index: 1,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "system");
        assert_eq!(json["index"], 1);
    }

    #[test]
    fn test_search_request_accepts_partial_bodies() {
        let req: SearchRequest = serde_json::from_str(r#"{"label_id": "INBOX"}"#).unwrap();
        assert_eq!(req.label_id.as_deref(), Some("INBOX"));
        assert!(req.start_date.is_none());
        assert!(req.end_date.is_none());
    }

    #[test]
    fn test_delete_request_roundtrip() {
        let req: DeleteRequest =
            serde_json::from_str(r#"{"message_ids": ["a", "b"]}"#).unwrap();
        assert_eq!(req.message_ids.len(), 2);

        let resp = DeleteResponse {
            success: true,
            deleted_count: 2,
            total_count: 2,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["deleted_count"], 2);
        assert_eq!(json["success"], true);
    }
}
