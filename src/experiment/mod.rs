//! Experiment tracking records
//!
//! Typed records and value objects of the SageMaker experiments API, mapped
//! through the generic [`Mapper`](crate::record::Mapper).
//!
//! ## Schema Overview
//!
//! ```text
//! TrialComponent
//!   ├── source            TrialComponentSource
//!   ├── status            TrialComponentStatus
//!   ├── created_by        UserContext  (ignored on decode)
//!   ├── last_modified_by  UserContext
//!   ├── parameters        name -> TrialComponentParameterValue
//!   ├── input_artifacts   name -> TrialComponentArtifact
//!   ├── output_artifacts  name -> TrialComponentArtifact
//!   └── metrics           [TrialComponentMetricSummary]
//!
//! list_trial_components ──> [TrialComponentSummary] (paginated)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use smexperiments::client::MemoryClient;
//! use smexperiments::experiment::{
//!     PrimaryStatus, TrialComponent, TrialComponentFilter, TrialComponentParameterValue,
//!     TrialComponentStatus,
//! };
//! use smexperiments::record::Mapper;
//!
//! let mapper = Mapper::new(MemoryClient::new());
//!
//! // Create a trial component
//! let mut tc = TrialComponent::create(&mapper, "preprocess", Some("Preprocessing"))?;
//!
//! // Record parameters and a final status
//! tc.set_parameter("train_split", TrialComponentParameterValue::number(0.8));
//! tc.complete(TrialComponentStatus::new(PrimaryStatus::Completed));
//! tc.save(&mapper)?;
//!
//! // List everything
//! let names: Vec<String> = TrialComponent::list(&mapper, &TrialComponentFilter::new())
//!     .filter_map(|summary| summary.ok()?.trial_component_name().map(str::to_string))
//!     .collect();
//! assert_eq!(names, ["preprocess"]);
//!
//! tc.delete(&mapper)?;
//! # Ok::<(), smexperiments::Error>(())
//! ```

mod artifact;
mod filter;
mod metric_summary;
mod parameters;
mod source;
mod status;
mod summary;
mod trial_component;

pub use artifact::TrialComponentArtifact;
pub use filter::{SortBy, SortOrder, TrialComponentFilter};
pub use metric_summary::{TrialComponentMetricSummary, TrialComponentMetricSummaryBuilder};
pub use parameters::{TrialComponentParameterValue, TrialComponentParameters};
pub use source::{TrialComponentSource, UserContext};
pub use status::{PrimaryStatus, TrialComponentStatus};
pub use summary::TrialComponentSummary;
pub use trial_component::TrialComponent;
