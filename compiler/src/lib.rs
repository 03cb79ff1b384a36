//! crudgen-compiler
//!
//! This crate implements:
//!  1) A parser for terse column schemas (`name:string(50), age:integer:nullable`),
//!  2) A parser for migration names (`add_age_to_users_table`),
//!  3) The configurable column-type whitelist and its categories,
//!  4) Syntax builders that render a schema as migration, model, request,
//!     factory, lang, view, test and API fragments,
//!  5) Stub lookup and placeholder substitution, and error types (`CrudError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod config;
pub mod parser;
pub mod migration_name;
pub mod template;
pub mod builders;

pub use config::{Category, GeneratorConfig, TypeConfig};
pub use error::CrudError;
pub use migration_name::parse_migration_name;
pub use parser::{parse_schema, SchemaParser};
pub use template::{substitute, Stubs};
pub use types::{Action, Field, MigrationMeta, OptionValue, Options, Schema};
