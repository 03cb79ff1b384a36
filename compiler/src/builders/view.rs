use crate::{
    builders::{join_non_empty, newline_indent},
    config::{Category, TypeConfig},
    error::CrudError,
    template::{substitute, Stubs},
    types::{Field, Schema},
    utils::{digits_arg, numeric_arg},
};

/// Views that have a page stub.
pub const VIEWS: [&str; 4] = ["index", "create", "edit", "show"];

const DEFAULT_MAX_LENGTH: usize = 255;
const TEXTAREA_THRESHOLD: usize = 100;
const DEFAULT_DIGITS: usize = 8;
const DEFAULT_PRECISION: usize = 2;

/// Builds the form controls of a Blade view from element stubs.
pub struct ViewSyntaxBuilder<'a> {
    types:     &'a TypeConfig,
    stubs:     &'a Stubs,
    view_name: String,
}

impl<'a> ViewSyntaxBuilder<'a> {
    pub fn new(types: &'a TypeConfig, stubs: &'a Stubs, view_name: impl Into<String>) -> Self {
        ViewSyntaxBuilder { types, stubs, view_name: view_name.into() }
    }

    pub fn create(&self, schema: &Schema) -> Result<String, CrudError> {
        // The name becomes part of a stub path.
        if !VIEWS.contains(&self.view_name.as_str()) {
            return Err(CrudError::InvalidName(self.view_name.clone()));
        }
        if schema.is_empty() {
            return Ok(String::new());
        }

        let stub = self.stubs.get(&format!("resources/views/{}.blade.stub", self.view_name))?;
        Ok(substitute(&stub, "column", &self.elements(schema)?))
    }

    pub fn elements(&self, schema: &Schema) -> Result<String, CrudError> {
        let mut elements = Vec::with_capacity(schema.len());
        for field in schema.iter().filter(|f| !f.is_foreign_constraint()) {
            elements.push(self.element(field)?);
        }
        Ok(join_non_empty(elements, &newline_indent(8)))
    }

    /// Name of the element stub used for a field.
    pub fn control(&self, field: &Field) -> &'static str {
        match self.types.category(&field.type_) {
            Some(Category::String) => {
                let long = numeric_arg(&field.arguments, 0).is_some_and(|len| len > TEXTAREA_THRESHOLD);
                if field.type_ == "text" || long {
                    "textarea"
                } else {
                    "text"
                }
            }
            Some(Category::Integer) => "number",
            Some(Category::Float)   => "decimal",
            Some(Category::Date)    => "date",
            None                    => "text",
        }
    }

    pub fn element(&self, field: &Field) -> Result<String, CrudError> {
        let control = self.control(field);
        let stub = self
            .stubs
            .get(&format!("resources/views/elements/{}.blade.stub", control))?;

        let required = if field.is_nullable() { "" } else { "required" };
        let mut element = substitute(&stub, "required", required);

        match self.types.category(&field.type_) {
            Some(Category::String) | None => {
                let max = numeric_arg(&field.arguments, 0)
                    .filter(|len| *len > 0)
                    .unwrap_or(DEFAULT_MAX_LENGTH);
                element = substitute(&element, "maxlength", &max.to_string());
            }
            Some(Category::Integer) => {
                let (min, max) = match digits_arg(&field.arguments, 0).filter(|d| *d > 0) {
                    Some(digits) => ("min=\"0\"".to_string(), format!("max=\"{}\"", "9".repeat(digits))),
                    None         => (String::new(), String::new()),
                };
                element = substitute(&element, "min", &min);
                element = substitute(&element, "max", &max);
            }
            Some(Category::Float) => {
                let precision = digits_arg(&field.arguments, 0).filter(|p| *p > 0);
                let scale     = digits_arg(&field.arguments, 1).filter(|s| *s > 0);
                let (digits, decimals) = match (precision, scale) {
                    (Some(p), Some(s)) => (p.saturating_sub(s), s),
                    _                  => (DEFAULT_DIGITS, DEFAULT_PRECISION),
                };
                element = substitute(&element, "digits", &"0".repeat(digits));
                element = substitute(&element, "precision", &"0".repeat(decimals));
            }
            Some(Category::Date) => {}
        }

        Ok(substitute(&element, "column", &field.name))
    }
}
