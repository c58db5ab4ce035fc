//! # smexperiments: Record Mapping for the SageMaker Experiments API
//!
//! **Version**: 0.1.0
//!
//! Typed records over a remote experiment-tracking service. Each record type
//! declares a static descriptor of its attributes and the remote operations
//! that act on it; one generic [`record::Mapper`] turns those declarations
//! into requests, responses into typed values, and list operations into lazy
//! iterators.
//!
//! ## Design Principles
//!
//! - **Declarative records**: attributes, casing and operations live in a
//!   `const` [`record::Shape`], checked by `validate` before any call
//! - **Tolerant decoding**: unknown fields and mismatched values are logged
//!   and dropped, never fatal
//! - **Pluggable transport**: everything goes through the
//!   [`client::SageMakerClient`] trait; [`client::MemoryClient`] serves
//!   tests and demos in-process
//!
//! ## Example Usage
//!
//! ```rust
//! use smexperiments::client::MemoryClient;
//! use smexperiments::experiment::TrialComponent;
//! use smexperiments::record::Mapper;
//!
//! let mapper = Mapper::new(MemoryClient::new());
//!
//! let mut tc = TrialComponent::create(&mapper, "train-1", Some("Training"))?;
//! tc.set_display_name(Some("Training (retry)".to_string()));
//! tc.save(&mapper)?;
//!
//! let loaded = TrialComponent::load(&mapper, "train-1")?;
//! assert_eq!(loaded.display_name(), Some("Training (retry)"));
//! # Ok::<(), smexperiments::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod casing;
pub mod client;
pub mod config;
pub mod error;
pub mod experiment;
pub mod record;

pub use error::{Error, Result};
