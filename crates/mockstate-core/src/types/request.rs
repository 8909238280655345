use serde::{Deserialize, Serialize};

/// Inbound REST request as seen by the override layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Request URI (path + query string). Empty when the host has none.
    pub url: String,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
