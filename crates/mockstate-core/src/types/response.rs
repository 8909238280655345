use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Outgoing REST response before it is serialized to the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Response body
    pub data: Value,
}

impl Response {
    /// `200` response with no headers.
    pub fn new(data: Value) -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            data,
        }
    }

    /// Replace the body, keeping status and headers.
    pub fn set_data(&mut self, data: Value) {
        self.data = data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_new_is_plain_ok() {
        let response = Response::new(json!({"data": []}));
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert_eq!(response.data, json!({"data": []}));
    }

    #[rstest]
    fn test_set_data_keeps_metadata() {
        let mut response = Response::new(json!({"real": true}));
        response.status = 206;
        response
            .headers
            .insert("X-WP-Total".to_string(), "3".to_string());

        response.set_data(json!([1, 2]));

        assert_eq!(response.status, 206);
        assert_eq!(response.headers.get("X-WP-Total").map(String::as_str), Some("3"));
        assert_eq!(response.data, json!([1, 2]));
    }

    #[rstest]
    fn test_empty_headers_omitted() {
        let json = serde_json::to_string(&Response::new(json!(null))).expect("Should serialize");
        assert!(!json.contains("headers"));
    }
}
