use crate::{
    builders::{join_non_empty, newline_indent},
    error::CrudError,
    template::{substitute, Stubs},
    types::Schema,
};

/// Seeds a translation file with one `'field' => 'field'` label per column.
pub struct LangSyntaxBuilder<'a> {
    stubs: &'a Stubs,
}

impl<'a> LangSyntaxBuilder<'a> {
    pub fn new(stubs: &'a Stubs) -> Self {
        LangSyntaxBuilder { stubs }
    }

    pub fn create(&self, schema: &Schema) -> Result<String, CrudError> {
        if schema.is_empty() {
            return Ok(String::new());
        }

        let stub = self.stubs.get("resources/lang/lang.stub")?;
        Ok(substitute(&stub, "column", &self.labels(schema)))
    }

    pub fn labels(&self, schema: &Schema) -> String {
        join_non_empty(
            schema
                .iter()
                .filter(|f| !f.is_foreign_constraint())
                .map(|f| format!("'{0}' => '{0}',", f.name)),
            &newline_indent(4),
        )
    }
}
