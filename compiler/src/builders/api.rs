use crate::{
    builders::join_non_empty,
    config::{Category, TypeConfig},
    error::CrudError,
    template::{substitute, Stubs},
    types::{Field, Schema},
};

/// Separator that continues an OpenAPI doc-block.
const PROPERTY_SEPARATOR: &str = "\n     *             ";

/// Builds the OpenAPI property list of an API controller.
pub struct ApiSyntaxBuilder<'a> {
    types: &'a TypeConfig,
    stubs: &'a Stubs,
}

impl<'a> ApiSyntaxBuilder<'a> {
    pub fn new(types: &'a TypeConfig, stubs: &'a Stubs) -> Self {
        ApiSyntaxBuilder { types, stubs }
    }

    pub fn create(&self, schema: &Schema) -> Result<String, CrudError> {
        if schema.is_empty() {
            return Ok(String::new());
        }

        let stub = self.stubs.get("app/Http/Controllers/ApiController.stub")?;
        Ok(substitute(&stub, "column", &self.properties(schema)))
    }

    pub fn properties(&self, schema: &Schema) -> String {
        join_non_empty(
            schema
                .iter()
                .filter(|f| !f.is_foreign_constraint())
                .map(|f| {
                    format!(
                        "@OA\\Property(property=\"{}\", type=\"{}\"),",
                        f.name,
                        self.data_type(f)
                    )
                }),
            PROPERTY_SEPARATOR,
        )
    }

    pub fn data_type(&self, field: &Field) -> &'static str {
        match self.types.category(&field.type_) {
            Some(Category::Integer) => "integer",
            Some(Category::String)  => "string",
            Some(Category::Float)   => "number",
            _ if field.type_ == "boolean" => "boolean",
            _ => "string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    #[test]
    fn test_property_types() {
        let stubs = Stubs::embedded();
        let builder = ApiSyntaxBuilder::new(TypeConfig::builtin(), &stubs);
        let schema = parse_schema(
            "name:string, age:integer, price:decimal(5,2), active:boolean, born_at:date, user_id:integer:foreign",
        )
        .unwrap();

        let types: Vec<&str> = schema.iter().map(|f| builder.data_type(f)).collect();
        assert_eq!(types[..5], ["string", "integer", "number", "boolean", "string"]);

        let properties = builder.properties(&schema);
        assert!(properties.starts_with("@OA\\Property(property=\"name\", type=\"string\"),\n     *             "));
        assert_eq!(properties.matches("@OA\\Property").count(), 6);
    }

    #[test]
    fn test_empty_schema() {
        let stubs = Stubs::embedded();
        let out = ApiSyntaxBuilder::new(TypeConfig::builtin(), &stubs)
            .create(&Schema::default())
            .unwrap();
        assert!(out.is_empty());
    }
}
