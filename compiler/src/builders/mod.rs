//! Syntax builders.
//!
//! Each builder projects a parsed [`Schema`](crate::types::Schema) into one
//! output dialect: every field is formatted to a line, empty lines are
//! dropped, the rest are joined with the dialect's separator and substituted
//! into a stub. An empty schema always yields empty output.

pub mod api;
pub mod factory;
pub mod lang;
pub mod migration;
pub mod model;
pub mod request;
pub mod test;
pub mod view;

pub use api::ApiSyntaxBuilder;
pub use factory::FactorySyntaxBuilder;
pub use lang::LangSyntaxBuilder;
pub use migration::{Direction, MigrationSchema, MigrationSyntaxBuilder};
pub use model::{ModelSchema, ModelSyntaxBuilder};
pub use request::RequestSyntaxBuilder;
pub use test::TestSyntaxBuilder;
pub use view::{ViewSyntaxBuilder, VIEWS};

/// A newline followed by `width` spaces.
pub(crate) fn newline_indent(width: usize) -> String {
    format!("\n{}", " ".repeat(width))
}

/// Joins the non-empty lines with `separator`.
pub(crate) fn join_non_empty<I>(lines: I, separator: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
