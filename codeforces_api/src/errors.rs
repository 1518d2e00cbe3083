//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent or its body could not be read.
    #[error("Request failed")]
    RequestFailed,
    /// A successful response did not carry the expected result.
    #[error("Could not decode {method} response: {snippet}")]
    Decode { method: String, snippet: String },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The API answered with `"status": "FAILED"`.
    #[error("API call failed: {comment}")]
    Api { comment: String },
}
