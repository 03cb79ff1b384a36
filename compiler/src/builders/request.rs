use crate::{
    builders::{join_non_empty, newline_indent},
    config::TypeConfig,
    error::CrudError,
    template::{substitute, Stubs},
    types::{Field, Schema},
};

/// Builds the `rules()` array of a form request.
pub struct RequestSyntaxBuilder<'a> {
    types: &'a TypeConfig,
    stubs: &'a Stubs,
}

impl<'a> RequestSyntaxBuilder<'a> {
    pub fn new(types: &'a TypeConfig, stubs: &'a Stubs) -> Self {
        RequestSyntaxBuilder { types, stubs }
    }

    pub fn create(&self, schema: &Schema) -> Result<String, CrudError> {
        if schema.is_empty() {
            return Ok(String::new());
        }

        let stub = self.stubs.get("app/Http/Requests/Request.stub")?;
        Ok(substitute(&stub, "rule", &self.rules(schema)))
    }

    pub fn rules(&self, schema: &Schema) -> String {
        join_non_empty(
            schema.iter().map(|f| self.add_rule(f)),
            &newline_indent(12),
        )
    }

    fn add_rule(&self, field: &Field) -> String {
        if field.is_foreign_constraint() {
            return String::new();
        }
        format!("'{}' => '{}',", field.name, self.rule(field))
    }

    /// `required|string|max:50`, `nullable|integer`, ...
    pub fn rule(&self, field: &Field) -> String {
        let mut rule = String::new();

        if field.is_nullable() {
            rule.push_str("nullable|");
        } else {
            rule.push_str("required|");
        }

        let type_ = field.type_.as_str();

        if self.types.is_string(type_) {
            rule.push_str("string|");
            if let Some(max) = field.arguments.first() {
                rule.push_str(&format!("max:{}|", max));
            }
        }
        if self.types.is_date(type_) {
            rule.push_str("date_format:d/m/Y|");
        }
        if self.types.is_integer(type_) {
            rule.push_str("integer|");
        }
        if self.types.is_float(type_) {
            rule.push_str("numeric|");
        }
        if self.types.category(type_).is_none() {
            tracing::debug!(field = %field.name, type_, "no type rule for column type");
        }

        rule.trim_end_matches('|').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn rules(schema: &str) -> String {
        let stubs = Stubs::embedded();
        RequestSyntaxBuilder::new(TypeConfig::builtin(), &stubs).rules(&parse_schema(schema).unwrap())
    }

    #[test]
    fn test_rules_by_category() {
        assert_eq!(rules("name:string(50)"), "'name' => 'required|string|max:50',");
        assert_eq!(rules("age:integer:nullable"), "'age' => 'nullable|integer',");
        assert_eq!(rules("price:decimal(8,2)"), "'price' => 'required|numeric',");
        assert_eq!(rules("born_at:date"), "'born_at' => 'required|date_format:d/m/Y',");
        assert_eq!(rules("bio:text"), "'bio' => 'required|string',");
    }

    #[test]
    fn test_uncategorized_type_falls_through() {
        assert_eq!(rules("active:boolean"), "'active' => 'required',");
        assert_eq!(rules("token:uuid:nullable"), "'token' => 'nullable',");
    }

    #[test]
    fn test_foreign_constraint_is_skipped() {
        assert_eq!(
            rules("title:string, user_id:integer:foreign"),
            "'title' => 'required|string',\n            'user_id' => 'required|integer',"
        );
    }

    #[test]
    fn test_create_fills_stub() {
        let stubs = Stubs::embedded();
        let out = RequestSyntaxBuilder::new(TypeConfig::builtin(), &stubs)
            .create(&parse_schema("name:string").unwrap())
            .unwrap();
        assert!(out.contains("return [\n            'name' => 'required|string',\n        ];"));
    }

    #[test]
    fn test_empty_schema() {
        let stubs = Stubs::embedded();
        let out = RequestSyntaxBuilder::new(TypeConfig::builtin(), &stubs)
            .create(&Schema::default())
            .unwrap();
        assert!(out.is_empty());
    }
}
