pub mod access;
pub mod cli;
pub mod config;
pub mod field;
pub mod i18n;
pub mod messages;
pub mod model;
pub mod provider;
pub mod query;
pub mod render;
pub mod store;

pub use access::{AccessControl, AccessPolicy, Capability};
pub use field::{FieldDeclaration, FieldOption, FieldValue, RequestContext, RequestInput};
pub use provider::CategoryOptionsProvider;
