//! Core types for the submission lifecycle.
//!
//! An [`AsyncPost`] is a plain value: it is never mutated in place. Each
//! transition consumes the previous snapshot and returns the next one, so an
//! owning store simply replaces the value it holds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::ErrorPayload;

/// Lifecycle phase of a submission. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    /// Nothing has been submitted yet.
    #[default]
    None,
    /// A request is in flight.
    Posting,
    /// The server accepted the last request.
    Posted,
    /// The last request failed.
    Error,
}

impl PostStatus {
    /// Wire name of the status, also used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::None => "NONE",
            PostStatus::Posting => "POSTING",
            PostStatus::Posted => "POSTED",
            PostStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one asynchronous submission.
///
/// `S` is the payload held locally and sent to the server, `R` is the
/// server's response. Serializes to the camelCase shape kept in UI state:
///
/// ```json
/// {"status": "POSTED", "data": {"name": "Alice"}, "responseData": {"id": 42}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncPost<S, R> {
    /// The current lifecycle phase.
    pub status: PostStatus,

    /// Payload being sent, or last sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<S>,

    /// Response from the server; only meaningful when `Posted`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<R>,

    /// Failure details; only meaningful when `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl<S, R> AsyncPost<S, R> {
    pub fn status(&self) -> PostStatus {
        self.status
    }

    pub fn is_none(&self) -> bool {
        self.status == PostStatus::None
    }

    pub fn is_posting(&self) -> bool {
        self.status == PostStatus::Posting
    }

    pub fn is_posted(&self) -> bool {
        self.status == PostStatus::Posted
    }

    pub fn is_error(&self) -> bool {
        self.status == PostStatus::Error
    }

    /// Flattened error messages, when an error is held.
    ///
    /// Note that a `Posting` snapshot may still carry the error of the
    /// previous attempt.
    pub fn error_messages(&self) -> Option<Vec<String>> {
        self.error.as_ref().map(ErrorPayload::flatten)
    }
}

/// Unique identifier for a store holding one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        PostId(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display only first 8 characters for readability in logs
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(PostStatus::None).unwrap(), json!("NONE"));
        assert_eq!(
            serde_json::to_value(PostStatus::Posting).unwrap(),
            json!("POSTING")
        );
        let parsed: PostStatus = serde_json::from_value(json!("POSTED")).unwrap();
        assert_eq!(parsed, PostStatus::Posted);
        assert_eq!(PostStatus::Error.to_string(), "ERROR");
        assert_eq!(PostStatus::default(), PostStatus::None);
    }

    #[test]
    fn test_snapshot_omits_absent_fields() {
        let post: AsyncPost<String, u32> = AsyncPost {
            status: PostStatus::Posted,
            data: Some("hello".to_string()),
            response_data: Some(7),
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({"status": "POSTED", "data": "hello", "responseData": 7})
        );
    }

    #[test]
    fn test_snapshot_deserializes_with_missing_fields() {
        let post: AsyncPost<String, u32> = serde_json::from_value(json!({
            "status": "ERROR",
            "error": {"name": ["required"]}
        }))
        .unwrap();
        assert!(post.is_error());
        assert_eq!(post.data, None);
        assert_eq!(post.error_messages(), Some(vec!["required".to_string()]));
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Signup {
        name: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Receipt {
        id: u32,
    }

    #[test]
    fn test_snapshot_deserializes_payloads_without_default() {
        let post: AsyncPost<Signup, Receipt> =
            serde_json::from_str(r#"{"status":"POSTING","data":{"name":"a"}}"#).unwrap();
        assert!(post.is_posting());
        assert_eq!(
            post.data,
            Some(Signup {
                name: "a".to_string()
            })
        );
        assert_eq!(post.response_data, None);

        let posted: AsyncPost<Signup, Receipt> = serde_json::from_str(
            r#"{"status":"POSTED","data":{"name":"a"},"responseData":{"id":3}}"#,
        )
        .unwrap();
        assert_eq!(posted.response_data, Some(Receipt { id: 3 }));
        assert_eq!(posted.error, None);
    }

    #[test]
    fn test_post_id_display_is_short() {
        let id = PostId::new();
        assert_eq!(id.to_string().len(), 8);
        assert!(id.0.to_string().starts_with(&id.to_string()));
    }
}
