//! crudgen
//!
//! Generates the files of a CRUD resource from a terse column schema.
//!
//! - `Generator` renders each artifact (migration, model, request, factory,
//!   lang, views, feature test, API controller) and whole resources.
//! - `write_files` / `append_log` handle the filesystem side.
//! - The parser, builders and configuration are re-exported from
//!   `crudgen-compiler`.

pub mod generator;
pub mod names;
pub mod output;

pub use crudgen_compiler::builders;
pub use crudgen_compiler::{
    parse_migration_name, parse_schema, CrudError, GeneratorConfig, Schema, TypeConfig,
};
pub use generator::{GeneratedFile, Generator, WEB_VIEWS};
pub use names::Names;
pub use output::{append_log, log_path, write_files};

/// Render a parsed schema as pretty-printed JSON.
pub fn schema_to_json(schema: &Schema) -> Result<String, CrudError> {
    Ok(serde_json::to_string_pretty(schema)?)
}
