//! Transport client seam
//!
//! The mapper never talks to the network itself. It hands an operation name
//! and a remote-cased request mapping to a [`SageMakerClient`] and gets a
//! response mapping back, or an error that keeps "not found" apart from
//! every other failure.
//!
//! Two clients ship with the crate:
//! - [`MemoryClient`]: an in-process trial component service
//! - [`ScriptedClient`]: replays queued replies and records every call
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use smexperiments::client::{SageMakerClient, ScriptedClient};
//!
//! let client = ScriptedClient::new();
//! client.push_response("describe_trial_component", json!({"TrialComponentName": "tc-1"}));
//!
//! let mut request = smexperiments::client::Fields::new();
//! request.insert("TrialComponentName".into(), json!("tc-1"));
//! let response = client.invoke("describe_trial_component", request)?;
//! assert_eq!(response["TrialComponentName"], "tc-1");
//! # Ok::<(), smexperiments::Error>(())
//! ```

mod memory;
mod scripted;

use std::sync::Arc;

pub use memory::{MemoryClient, MemoryClientConfig};
pub use scripted::{RecordedCall, ScriptedClient};

use crate::Result;

/// Remote-cased field mapping of a request or response.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Issues remote calls keyed by operation name.
///
/// Implementations report a missing resource as [`crate::Error::NotFound`]
/// and any other failure as [`crate::Error::Service`] or
/// [`crate::Error::Transport`]. Retries and timeouts belong here, not in the
/// mapper.
pub trait SageMakerClient: Send + Sync {
    /// Invoke `operation` with `request` and return the response mapping.
    ///
    /// # Errors
    ///
    /// Whatever the remote side or the transport reports.
    fn invoke(&self, operation: &str, request: Fields) -> Result<Fields>;
}

impl<T: SageMakerClient + ?Sized> SageMakerClient for &T {
    fn invoke(&self, operation: &str, request: Fields) -> Result<Fields> {
        (**self).invoke(operation, request)
    }
}

impl<T: SageMakerClient + ?Sized> SageMakerClient for Box<T> {
    fn invoke(&self, operation: &str, request: Fields) -> Result<Fields> {
        (**self).invoke(operation, request)
    }
}

impl<T: SageMakerClient + ?Sized> SageMakerClient for Arc<T> {
    fn invoke(&self, operation: &str, request: Fields) -> Result<Fields> {
        (**self).invoke(operation, request)
    }
}
