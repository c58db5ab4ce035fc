//! Scripted client: queued replies, recorded calls.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::{Fields, SageMakerClient};
use crate::{Error, Result};

/// One call received by a [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation name
    pub operation: String,
    /// Request mapping as received
    pub request: Fields,
}

struct Reply {
    operation: String,
    outcome: Result<Fields>,
}

/// Client that answers calls from a queue of scripted replies.
///
/// Replies are consumed in order. A call whose operation does not match the
/// next reply, or a call with nothing queued, fails with
/// [`Error::Transport`]. Every call is recorded either way.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedClient {
    /// Create a client with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply for `operation`.
    ///
    /// A `response` that is not a JSON object is queued as an empty mapping.
    pub fn push_response(&self, operation: impl Into<String>, response: Value) {
        let fields = match response {
            Value::Object(map) => map,
            _ => Fields::new(),
        };
        lock(&self.replies).push_back(Reply {
            operation: operation.into(),
            outcome: Ok(fields),
        });
    }

    /// Queue a failure for `operation`.
    pub fn push_error(&self, operation: impl Into<String>, error: Error) {
        lock(&self.replies).push_back(Reply {
            operation: operation.into(),
            outcome: Err(error),
        });
    }

    /// All calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of replies not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.replies).len()
    }
}

impl SageMakerClient for ScriptedClient {
    fn invoke(&self, operation: &str, request: Fields) -> Result<Fields> {
        lock(&self.calls).push(RecordedCall {
            operation: operation.to_string(),
            request,
        });

        let mut replies = lock(&self.replies);
        match replies.front() {
            None => Err(Error::Transport(format!(
                "no scripted reply left for '{operation}'"
            ))),
            Some(reply) if reply.operation != operation => Err(Error::Transport(format!(
                "expected call to '{}', got '{operation}'",
                reply.operation
            ))),
            Some(_) => replies
                .pop_front()
                .map_or_else(|| Ok(Fields::new()), |reply| reply.outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replies_in_order() {
        let client = ScriptedClient::new();
        client.push_response("a", json!({"X": 1}));
        client.push_error("b", Error::not_found("b", "gone"));

        assert_eq!(client.invoke("a", Fields::new()).unwrap()["X"], 1);
        assert!(client.invoke("b", Fields::new()).unwrap_err().is_not_found());
        assert_eq!(client.call_count(), 2);
        assert_eq!(client.pending(), 0);
    }

    #[test]
    fn test_operation_mismatch_keeps_reply() {
        let client = ScriptedClient::new();
        client.push_response("a", json!({}));

        let err = client.invoke("b", Fields::new()).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(client.pending(), 1);
    }

    #[test]
    fn test_empty_queue_is_transport_error() {
        let client = ScriptedClient::new();
        let err = client.invoke("a", Fields::new()).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(client.calls()[0].operation, "a");
    }
}
