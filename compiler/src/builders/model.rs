use inflector::Inflector;

use crate::{
    builders::{join_non_empty, newline_indent},
    error::CrudError,
    template::{substitute, Stubs},
    types::{Field, OptionValue, Schema},
};

/// Fragments substituted into a model class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSchema {
    pub column:     String,
    pub foreign:    String,
    pub searchable: String,
}

pub struct ModelSyntaxBuilder<'a> {
    stubs: &'a Stubs,
}

impl<'a> ModelSyntaxBuilder<'a> {
    pub fn new(stubs: &'a Stubs) -> Self {
        ModelSyntaxBuilder { stubs }
    }

    pub fn create(&self, schema: &Schema) -> Result<ModelSchema, CrudError> {
        if schema.is_empty() {
            return Ok(ModelSchema::default());
        }

        tracing::debug!(fields = schema.len(), "building model");

        let column = substitute(
            &self.stubs.get("app/ColumnModel.stub")?,
            "column",
            &self.columns(schema),
        );
        let foreign = self.foreign(schema)?;
        let searchable = substitute(
            &self.stubs.get("app/SearchablesModel.stub")?,
            "searchable",
            &self.searchables(schema),
        );

        Ok(ModelSchema { column, foreign, searchable })
    }

    /// `['data' => 'name'],` for every required, non-foreign field.
    pub fn columns(&self, schema: &Schema) -> String {
        join_non_empty(
            schema
                .iter()
                .filter(|f| is_listed(f))
                .map(|f| format!("['data' => '{}'],", f.name)),
            &newline_indent(12),
        )
    }

    /// `'name' => 'like',` for every required, non-foreign field.
    pub fn searchables(&self, schema: &Schema) -> String {
        join_non_empty(
            schema
                .iter()
                .filter(|f| is_listed(f))
                .map(|f| format!("'{}' => 'like',", f.name)),
            &newline_indent(12),
        )
    }

    /// One `belongsTo` relation per foreign constraint.
    pub fn foreign(&self, schema: &Schema) -> Result<String, CrudError> {
        let mut relations = Vec::new();

        for field in schema.iter().filter(|f| f.is_foreign_constraint()) {
            let object = related_object(field);
            let stub = self.stubs.get("app/ForeignModel.stub")?;
            let relation = substitute(&stub, "objectForeignName", &object);
            relations.push(substitute(&relation, "ModelForeignName", &object.to_pascal_case()));
        }

        Ok(join_non_empty(relations, "\n"))
    }
}

fn is_listed(field: &Field) -> bool {
    !field.is_nullable() && !field.is_foreign_constraint()
}

/// `on('users')` -> `user`
fn related_object(field: &Field) -> String {
    let table = match field.options.get("on") {
        Some(OptionValue::Value(v)) => v.replace('\'', ""),
        _ => field.name.strip_suffix("_id").unwrap_or(&field.name).to_plural(),
    };
    table.to_singular()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    #[test]
    fn test_nullable_and_foreign_are_not_listed() {
        let stubs = Stubs::embedded();
        let builder = ModelSyntaxBuilder::new(&stubs);
        let schema = parse_schema("name:string, bio:text:nullable, user_id:integer:foreign").unwrap();

        assert_eq!(
            builder.columns(&schema),
            "['data' => 'name'],\n            ['data' => 'user_id'],"
        );
        assert_eq!(
            builder.searchables(&schema),
            "'name' => 'like',\n            'user_id' => 'like',"
        );
    }

    #[test]
    fn test_foreign_relation() {
        let stubs = Stubs::embedded();
        let builder = ModelSyntaxBuilder::new(&stubs);
        let schema = parse_schema("title:string, blog_category_id:integer:foreign").unwrap();

        let foreign = builder.foreign(&schema).unwrap();
        assert!(foreign.contains("public function blog_category()"));
        assert!(foreign.contains("$this->belongsTo(BlogCategory::class)"));
        assert_eq!(foreign.matches("belongsTo").count(), 1);
    }

    #[test]
    fn test_create_wraps_fragments() {
        let stubs = Stubs::embedded();
        let schema = parse_schema("name:string").unwrap();
        let model = ModelSyntaxBuilder::new(&stubs).create(&schema).unwrap();

        assert!(model.column.contains("['data' => 'name'],"));
        assert!(!model.column.contains("{{column}}"));
        assert!(model.searchable.contains("'name' => 'like',"));
        assert!(model.foreign.is_empty());
    }

    #[test]
    fn test_empty_schema() {
        let stubs = Stubs::embedded();
        let model = ModelSyntaxBuilder::new(&stubs).create(&Schema::default()).unwrap();
        assert_eq!(model, ModelSchema::default());
    }
}
