pub mod runner;
pub mod submission;

pub use runner::{DemoRunner, RunRequest, Runner};
pub use submission::build_run_inputs;
