//! Single-writer holder for one submission.
//!
//! [`PostStore`] owns the current [`AsyncPost`] snapshot and replaces it on
//! every [`PostAction`]. All changes go through `&mut self`, so two writers
//! can never race on the same submission.

use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ErrorPayload;
use crate::domain::post::{AsyncPost, PostId, PostStatus};
use crate::transport::PostTransport;

/// A reducer action naming one transition.
///
/// Serializes as `{"type": "POSTING", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostAction<S, R> {
    /// A request carrying this payload has been sent.
    Posting(S),
    /// The server answered with this response.
    Posted(R),
    /// The request failed.
    Error(ErrorPayload),
    /// Start over with a fresh payload.
    Reset(S),
}

impl<S, R> PostAction<S, R> {
    /// Status the reducer will land in after applying this action.
    pub fn target_status(&self) -> PostStatus {
        match self {
            PostAction::Posting(_) => PostStatus::Posting,
            PostAction::Posted(_) => PostStatus::Posted,
            PostAction::Error(_) => PostStatus::Error,
            PostAction::Reset(_) => PostStatus::None,
        }
    }
}

impl<S, R> AsyncPost<S, R> {
    /// Apply `action` to this snapshot.
    pub fn reduce(self, action: PostAction<S, R>) -> Self {
        match action {
            PostAction::Posting(data) => self.posting(data),
            PostAction::Posted(response) => self.posted(response),
            PostAction::Error(error) => self.error(error),
            PostAction::Reset(data) => AsyncPost::init(data),
        }
    }
}

/// Configuration for a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Timeout handed to the transport for each submission, in milliseconds
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { timeout_ms: 30_000 }
    }
}

/// Owner of one submission's lifecycle.
#[derive(Debug, Clone)]
pub struct PostStore<S, R> {
    id: PostId,
    state: AsyncPost<S, R>,
    config: StoreConfig,
}

impl<S, R> PostStore<S, R> {
    /// Create a store holding `AsyncPost::init(initial)`.
    pub fn new(initial: S) -> Self {
        Self {
            id: PostId::new(),
            state: AsyncPost::init(initial),
            config: StoreConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn state(&self) -> &AsyncPost<S, R> {
        &self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn into_state(self) -> AsyncPost<S, R> {
        self.state
    }

    /// Replace the held snapshot with the result of applying `action`.
    pub fn dispatch(&mut self, action: PostAction<S, R>) -> &AsyncPost<S, R> {
        let from = self.state.status;
        let to = action.target_status();

        // Transitions consume the snapshot; park a placeholder while reducing
        let previous = std::mem::replace(&mut self.state, placeholder());
        self.state = previous.reduce(action);

        counter!("async_post_transitions_total", "status" => to.as_str()).increment(1);
        tracing::debug!(
            post_id = %self.id,
            from = %from,
            to = %to,
            "Submission transitioned"
        );

        &self.state
    }
}

fn placeholder<S, R>() -> AsyncPost<S, R> {
    AsyncPost {
        status: PostStatus::None,
        data: None,
        response_data: None,
        error: None,
    }
}

impl<S, R> PostStore<S, R>
where
    S: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    /// Send `data` through `transport` and record the outcome.
    ///
    /// The store is `Posting` while the transport is awaited, then `Posted`
    /// or `Error`. Transport failures end up in the error state and are not
    /// returned.
    ///
    /// The configured `timeout_ms` is only forwarded to the transport; this
    /// method enforces no deadline of its own.
    ///
    /// # Cancel safety
    ///
    /// Not cancellation safe. If the returned future is dropped while the
    /// transport is in flight, the store is left in `Posting`. Dispatch an
    /// `Error` or `Reset` action afterwards to leave that state.
    pub async fn submit<T>(&mut self, transport: &T, data: S) -> &AsyncPost<S, R>
    where
        T: PostTransport<S, R> + ?Sized,
    {
        let timeout_ms = self.config.timeout_ms;
        self.dispatch(PostAction::Posting(data.clone()));

        tracing::debug!(post_id = %self.id, timeout_ms, "Sending submission");

        match transport.send(&data, timeout_ms).await {
            Ok(response) => {
                counter!("async_post_submissions_total", "outcome" => "posted").increment(1);
                tracing::info!(post_id = %self.id, "Submission accepted");
                self.dispatch(PostAction::Posted(response))
            }
            Err(e) => {
                counter!("async_post_submissions_total", "outcome" => "error").increment(1);
                tracing::warn!(post_id = %self.id, error = %e, "Submission failed");
                self.dispatch(PostAction::Error(e.into()))
            }
        }
    }
}
