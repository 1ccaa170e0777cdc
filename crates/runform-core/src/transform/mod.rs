pub mod complexity;
pub mod endpoint_lister;
pub mod field_mapper;
pub mod form_compiler;
pub mod label;

pub use complexity::is_complex;
pub use endpoint_lister::{has_endpoint, list_endpoints};
pub use field_mapper::to_field;
pub use form_compiler::{compile, compile_sections, resolve_operation};
