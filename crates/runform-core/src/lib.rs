pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod run;
pub mod transform;

pub use model::{EndpointMeta, FieldKind, FormField, FormModel, RunEnvelope, RunStatus};
pub use run::{DemoRunner, RunRequest, Runner};
pub use transform::{compile, list_endpoints};
