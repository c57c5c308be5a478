//! Transport abstraction for sending a submission.
//!
//! This module defines the `PostTransport` trait so that a store can drive a
//! submission without knowing how bytes reach the server, and a mock
//! implementation for tests. The crate ships no network implementation.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::{AsyncPostError, Result};

/// Trait for sending a payload and receiving the server's response.
///
/// Implementations report a server-side refusal as
/// [`AsyncPostError::Rejected`] so the payload reaches the error state intact.
/// Any other error is recorded as a plain message.
///
/// # Example
/// ```ignore
/// let response = transport.send(&contact_form, 30_000).await?;
/// ```
#[async_trait]
pub trait PostTransport<S, R>: Send + Sync
where
    S: Send + Sync + 'static,
    R: Send + 'static,
{
    /// Send `data`, giving up after `timeout_ms`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The server rejects the payload
    /// - The request fails or times out
    async fn send(&self, data: &S, timeout_ms: u64) -> Result<R>;
}

/// Mock transport for testing.
///
/// Outcomes are queued up front and handed out in FIFO order.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::<Contact, Created>::new();
/// mock.add_response(Ok(Created { id: 42 }));
/// mock.add_response(Err(AsyncPostError::Rejected("email taken".into())));
/// ```
pub struct MockTransport<S, R> {
    responses: Arc<Mutex<VecDeque<MockResponse<R>>>>,
    calls: Arc<Mutex<Vec<MockCall<S>>>>,
    in_flight: Arc<AtomicUsize>,
}

/// A mock outcome that can optionally wait for a trigger before completing.
enum MockResponse<R> {
    /// Immediate outcome
    Immediate(Result<R>),
    /// Outcome that waits for a trigger signal before completing
    Triggered {
        response: Result<R>,
        trigger: oneshot::Receiver<()>,
    },
}

/// Record of a call made to the mock transport.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall<S> {
    pub data: S,
    pub timeout_ms: u64,
}

impl<S, R> MockTransport<S, R> {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue an outcome for the next unanswered call.
    pub fn add_response(&self, response: Result<R>) {
        self.responses
            .lock()
            .push_back(MockResponse::Immediate(response));
    }

    /// Queue an outcome that is held back until the returned sender fires
    /// (or is dropped).
    ///
    /// # Example
    /// ```ignore
    /// let trigger = mock.add_response_with_trigger(Ok(Created { id: 1 }));
    /// // ... the store is now observably POSTING ...
    /// trigger.send(()).unwrap();
    /// ```
    pub fn add_response_with_trigger(&self, response: Result<R>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.responses.lock().push_back(MockResponse::Triggered {
            response,
            trigger: rx,
        });
        tx
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Get the number of sends currently waiting on a trigger or outcome.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl<S: Clone, R> MockTransport<S, R> {
    /// Get all calls that have been made to this mock transport.
    pub fn get_calls(&self) -> Vec<MockCall<S>> {
        self.calls.lock().clone()
    }
}

impl<S, R> Clone for MockTransport<S, R> {
    fn clone(&self) -> Self {
        Self {
            responses: self.responses.clone(),
            calls: self.calls.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<S, R> Default for MockTransport<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S, R> PostTransport<S, R> for MockTransport<S, R>
where
    S: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    async fn send(&self, data: &S, timeout_ms: u64) -> Result<R> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard {
            in_flight: self.in_flight.clone(),
        };

        self.calls.lock().push(MockCall {
            data: data.clone(),
            timeout_ms,
        });

        let mock_response = self.responses.lock().pop_front();

        match mock_response {
            Some(MockResponse::Immediate(response)) => response,
            Some(MockResponse::Triggered { response, trigger }) => {
                // Proceed whether the sender fired or was dropped
                let _ = trigger.await;
                response
            }
            None => Err(AsyncPostError::Other(anyhow::anyhow!(
                "No mock response configured (call #{})",
                self.call_count()
            ))),
        }
    }
}

/// Guard that decrements the in-flight counter when dropped.
struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorPayload;

    #[tokio::test]
    async fn test_mock_transport_basic() {
        let mock = MockTransport::<String, u32>::new();
        mock.add_response(Ok(201));

        let response = mock.send(&"hello".to_string(), 5000).await.unwrap();
        assert_eq!(response, 201);

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].data, "hello");
        assert_eq!(calls[0].timeout_ms, 5000);
    }

    #[tokio::test]
    async fn test_mock_transport_fifo() {
        let mock = MockTransport::<String, u32>::new();
        mock.add_response(Ok(1));
        mock.add_response(Err(AsyncPostError::Rejected(ErrorPayload::from("taken"))));

        assert_eq!(mock.send(&"a".to_string(), 10).await.unwrap(), 1);
        let err = mock.send(&"b".to_string(), 10).await.unwrap_err();
        assert!(matches!(err, AsyncPostError::Rejected(_)));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_transport_no_response() {
        let mock = MockTransport::<String, u32>::new();
        let result = mock.send(&"a".to_string(), 10).await;
        assert!(matches!(result, Err(AsyncPostError::Other(_))));
        assert_eq!(mock.in_flight_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_transport_with_trigger() {
        let mock = MockTransport::<String, u32>::new();
        let trigger = mock.add_response_with_trigger(Ok(7));

        let mock_clone = mock.clone();
        let handle = tokio::spawn(async move { mock_clone.send(&"a".to_string(), 10).await });

        // Give it a moment to start executing
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        assert!(!handle.is_finished());
        assert_eq!(mock.in_flight_count(), 1);

        trigger.send(()).unwrap();

        let response = handle.await.unwrap().unwrap();
        assert_eq!(response, 7);
        assert_eq!(mock.in_flight_count(), 0);
    }
}
