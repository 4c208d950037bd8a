use serde::Deserialize;

/// Envelope the pet store answers with on deletes and on errors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}
