pub mod endpoint;
pub mod envelope;
pub mod form;
pub mod inputs;

pub use endpoint::{EndpointMeta, HttpMethod, endpoint_id, split_endpoint_id};
pub use envelope::{ArtifactRef, ErrorClass, RunEnvelope, RunStatus};
pub use form::{BodyFields, CompiledForm, FieldKind, FormField, FormModel};
pub use inputs::{RunInputs, ScalarValue};
