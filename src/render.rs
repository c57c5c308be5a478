//! Status-driven dispatch for presenting a submission.
//!
//! A view registers one optional handler per [`PostStatus`] and
//! [`render_by_status`] runs the single handler matching the snapshot.

use crate::domain::errors::ErrorPayload;
use crate::domain::post::{AsyncPost, PostStatus};

type Thunk<'a, T> = Box<dyn FnOnce() -> T + 'a>;
type PostedHandler<'a, S, T> = Box<dyn FnOnce(Option<&S>) -> T + 'a>;
type ErrorHandler<'a, T> = Box<dyn FnOnce(Option<&ErrorPayload>) -> T + 'a>;

/// Optional handlers keyed by status.
///
/// # Example
/// ```
/// use async_post::{AsyncPost, RenderHandlers, render_by_status};
///
/// let post: AsyncPost<String, ()> = AsyncPost::init("hi".to_string()).posting("hi".to_string());
/// let view = render_by_status(
///     &post,
///     RenderHandlers::new()
///         .on_posting(|| "spinner".to_string())
///         .on_none(|| "form".to_string()),
/// );
/// assert_eq!(view.as_deref(), Some("spinner"));
/// ```
pub struct RenderHandlers<'a, S, T> {
    none: Option<Thunk<'a, T>>,
    posting: Option<Thunk<'a, T>>,
    posted: Option<PostedHandler<'a, S, T>>,
    error: Option<ErrorHandler<'a, T>>,
}

impl<'a, S, T> RenderHandlers<'a, S, T> {
    pub fn new() -> Self {
        Self {
            none: None,
            posting: None,
            posted: None,
            error: None,
        }
    }

    /// Fallback for `None`, and for any status without its own handler.
    pub fn on_none(mut self, handler: impl FnOnce() -> T + 'a) -> Self {
        self.none = Some(Box::new(handler));
        self
    }

    pub fn on_posting(mut self, handler: impl FnOnce() -> T + 'a) -> Self {
        self.posting = Some(Box::new(handler));
        self
    }

    /// Receives the submitted payload, not the server response.
    pub fn on_posted(mut self, handler: impl FnOnce(Option<&S>) -> T + 'a) -> Self {
        self.posted = Some(Box::new(handler));
        self
    }

    pub fn on_error(mut self, handler: impl FnOnce(Option<&ErrorPayload>) -> T + 'a) -> Self {
        self.error = Some(Box::new(handler));
        self
    }

    /// Whether a dedicated handler is registered for `status`.
    pub fn handles(&self, status: PostStatus) -> bool {
        match status {
            PostStatus::None => self.none.is_some(),
            PostStatus::Posting => self.posting.is_some(),
            PostStatus::Posted => self.posted.is_some(),
            PostStatus::Error => self.error.is_some(),
        }
    }
}

impl<S, T> Default for RenderHandlers<'_, S, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run exactly one handler for the snapshot's status.
///
/// Falls back to the `none` handler when the status has no handler of its
/// own, and returns `None` when there is nothing to run.
pub fn render_by_status<S, R, T>(
    post: &AsyncPost<S, R>,
    handlers: RenderHandlers<'_, S, T>,
) -> Option<T> {
    let RenderHandlers {
        none,
        posting,
        posted,
        error,
    } = handlers;

    let rendered = match post.status {
        PostStatus::Posted => posted.map(|handler| handler(post.data.as_ref())),
        PostStatus::Posting => posting.map(|handler| handler()),
        PostStatus::Error => error.map(|handler| handler(post.error.as_ref())),
        PostStatus::None => None,
    };

    rendered.or_else(|| none.map(|handler| handler()))
}

impl<S, R> AsyncPost<S, R> {
    /// See [`render_by_status`].
    pub fn render<T>(&self, handlers: RenderHandlers<'_, S, T>) -> Option<T> {
        render_by_status(self, handlers)
    }
}
