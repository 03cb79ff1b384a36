use crate::{
    builders::{join_non_empty, newline_indent},
    error::CrudError,
    template::{substitute, Stubs},
    types::Schema,
};

/// Builds the feature test of a resource: the expected column list and one
/// validation assertion per required field.
pub struct TestSyntaxBuilder<'a> {
    stubs: &'a Stubs,
}

impl<'a> TestSyntaxBuilder<'a> {
    pub fn new(stubs: &'a Stubs) -> Self {
        TestSyntaxBuilder { stubs }
    }

    pub fn create(&self, schema: &Schema, api: bool) -> Result<String, CrudError> {
        if schema.is_empty() {
            return Ok(String::new());
        }

        let path = if api { "tests/Feature/ApiTest.stub" } else { "tests/Feature/WebTest.stub" };
        let stub = self.stubs.get(path)?;

        let with_columns = substitute(&stub, "column", &self.columns(schema));
        Ok(substitute(&with_columns, "required", &self.required(schema, api)))
    }

    pub fn columns(&self, schema: &Schema) -> String {
        join_non_empty(
            schema
                .iter()
                .filter(|f| !f.is_foreign_constraint())
                .map(|f| format!("'{}',", f.name)),
            &newline_indent(20),
        )
    }

    pub fn required(&self, schema: &Schema, api: bool) -> String {
        let assert = if api { "assertJsonValidationErrors" } else { "assertSessionHasErrors" };

        join_non_empty(
            schema
                .iter()
                .filter(|f| !f.is_foreign_constraint() && !f.is_nullable())
                .map(|f| format!("$response->{}('{}');", assert, f.name)),
            &newline_indent(8),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    #[test]
    fn test_columns_and_required() {
        let stubs = Stubs::embedded();
        let builder = TestSyntaxBuilder::new(&stubs);
        let schema = parse_schema("name:string, bio:text:nullable, user_id:integer:foreign").unwrap();

        assert_eq!(
            builder.columns(&schema),
            format!("'name',{0}'bio',{0}'user_id',", newline_indent(20))
        );
        assert_eq!(
            builder.required(&schema, false),
            "$response->assertSessionHasErrors('name');\n        \
             $response->assertSessionHasErrors('user_id');"
        );
        assert!(builder.required(&schema, true).starts_with("$response->assertJsonValidationErrors('name');"));
    }

    #[test]
    fn test_create_selects_stub() {
        let stubs = Stubs::embedded();
        let schema = parse_schema("name:string").unwrap();
        let builder = TestSyntaxBuilder::new(&stubs);

        let api = builder.create(&schema, true).unwrap();
        assert!(api.contains("postJson"));
        assert!(api.contains("$response->assertJsonValidationErrors('name');"));
        assert!(!api.contains("{{required}}"));

        let web = builder.create(&schema, false).unwrap();
        assert!(web.contains("$response->assertSessionHasErrors('name');"));
        assert!(!web.contains("{{column}}"));
    }

    #[test]
    fn test_empty_schema() {
        let stubs = Stubs::embedded();
        assert!(TestSyntaxBuilder::new(&stubs).create(&Schema::default(), true).unwrap().is_empty());
    }
}
