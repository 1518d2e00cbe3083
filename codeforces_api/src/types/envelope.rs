use serde::{Deserialize, Serialize};

/// Outcome flag carried by every API response.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiStatus {
    Ok,
    Failed,
}

/// Envelope wrapping every API payload: `{"status": ..., "result": ..., "comment": ...}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub status: ApiStatus,
    pub result: Option<T>,
    pub comment: Option<String>,
}
