use crate::{
    builders::{join_non_empty, newline_indent},
    error::CrudError,
    template::{substitute, Stubs},
    types::{Action, Field, MigrationMeta, OptionValue, Schema},
};

const CREATE_WRAPPER: &str = "database/migrations/schema-create.stub";
const CHANGE_WRAPPER: &str = "database/migrations/schema-change.stub";

/// Whether a column statement adds or drops the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Add,
    Drop,
}

impl Direction {
    pub fn format(self, field: &Field) -> String {
        match self {
            Direction::Add  => add_column(field),
            Direction::Drop => drop_column(field),
        }
    }
}

/// `$table->decimal('amount', 5, 2)->nullable();`
fn add_column(field: &Field) -> String {
    let mut syntax = format!("$table->{}('{}'", field.type_, field.name);

    for argument in &field.arguments {
        syntax.push_str(", ");
        syntax.push_str(argument);
    }
    syntax.push(')');

    for (method, value) in field.options.iter() {
        match value {
            OptionValue::Flag     => syntax.push_str(&format!("->{}()", method)),
            OptionValue::Value(v) => syntax.push_str(&format!("->{}({})", method, v)),
        }
    }

    syntax.push(';');
    syntax
}

fn drop_column(field: &Field) -> String {
    format!("$table->dropColumn('{}');", field.name)
}

/// Bodies for the `up` and `down` methods of a migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSchema {
    pub up:   String,
    pub down: String,
}

pub struct MigrationSyntaxBuilder<'a> {
    stubs: &'a Stubs,
}

impl<'a> MigrationSyntaxBuilder<'a> {
    pub fn new(stubs: &'a Stubs) -> Self {
        MigrationSyntaxBuilder { stubs }
    }

    pub fn create(&self, schema: &Schema, meta: &MigrationMeta) -> Result<MigrationSchema, CrudError> {
        let (up, down) = match &meta.action {
            Action::Other(action) => {
                return Err(CrudError::UnsupportedMigrationAction(action.clone()))
            }
            _ if schema.is_empty() => return Ok(MigrationSchema::default()),
            Action::Create => (
                self.wrap(CREATE_WRAPPER, schema, Direction::Add)?,
                format!("Schema::dropIfExists('{}');", meta.table),
            ),
            Action::Add => (
                self.wrap(CHANGE_WRAPPER, schema, Direction::Add)?,
                self.wrap(CHANGE_WRAPPER, schema, Direction::Drop)?,
            ),
            Action::Remove => (
                self.wrap(CHANGE_WRAPPER, schema, Direction::Drop)?,
                self.wrap(CHANGE_WRAPPER, schema, Direction::Add)?,
            ),
        };

        tracing::debug!(action = meta.action.as_str(), table = %meta.table, fields = schema.len(), "built migration");
        Ok(MigrationSchema { up, down })
    }

    /// The column statements alone, one per field.
    pub fn columns(&self, schema: &Schema, direction: Direction) -> String {
        join_non_empty(schema.iter().map(|f| direction.format(f)), &newline_indent(12))
    }

    fn wrap(&self, wrapper: &str, schema: &Schema, direction: Direction) -> Result<String, CrudError> {
        let wrapper = self.stubs.get(wrapper)?;
        Ok(substitute(&wrapper, "schema_up", &self.columns(schema, direction)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn meta(action: Action) -> MigrationMeta {
        MigrationMeta { action, table: "users".to_string() }
    }

    #[test]
    fn test_add_column_with_arguments_and_options() {
        let schema = parse_schema("amount:decimal(5,2):nullable:default(0)").unwrap();
        assert_eq!(
            Direction::Add.format(&schema.fields[0]),
            "$table->decimal('amount', 5, 2)->nullable()->default(0);"
        );
    }

    #[test]
    fn test_foreign_constraint_column() {
        let schema = parse_schema("user_id:unsignedBigInteger:foreign").unwrap();
        let stubs = Stubs::embedded();
        let builder = MigrationSyntaxBuilder::new(&stubs);
        assert_eq!(
            builder.columns(&schema, Direction::Add),
            "$table->unsignedBigInteger('user_id');\n            \
             $table->foreign('user_id')->references('id')->on('users');"
        );
    }

    #[test]
    fn test_create_action() {
        let stubs = Stubs::embedded();
        let schema = parse_schema("name:string, age:integer").unwrap();
        let out = MigrationSyntaxBuilder::new(&stubs).create(&schema, &meta(Action::Create)).unwrap();

        assert!(out.up.starts_with("Schema::create('{{table}}'"));
        assert!(out.up.contains("$table->string('name');\n            $table->integer('age');"));
        assert_eq!(out.down, "Schema::dropIfExists('users');");
    }

    #[test]
    fn test_add_action_is_inverse_of_remove() {
        let stubs = Stubs::embedded();
        let builder = MigrationSyntaxBuilder::new(&stubs);
        let schema = parse_schema("bio:text:nullable").unwrap();

        let add = builder.create(&schema, &meta(Action::Add)).unwrap();
        let remove = builder.create(&schema, &meta(Action::Remove)).unwrap();

        assert!(add.up.starts_with("Schema::table('{{table}}'"));
        assert!(add.up.contains("$table->text('bio')->nullable();"));
        assert!(add.down.contains("$table->dropColumn('bio');"));
        assert_eq!(add.up, remove.down);
        assert_eq!(add.down, remove.up);
    }

    #[test]
    fn test_unsupported_action() {
        let stubs = Stubs::embedded();
        let schema = parse_schema("name:string").unwrap();
        let err = MigrationSyntaxBuilder::new(&stubs)
            .create(&schema, &meta(Action::Other("rename".into())))
            .unwrap_err();
        assert!(matches!(err, CrudError::UnsupportedMigrationAction(ref a) if a == "rename"));
    }

    #[test]
    fn test_empty_schema() {
        let stubs = Stubs::embedded();
        let out = MigrationSyntaxBuilder::new(&stubs)
            .create(&Schema::default(), &meta(Action::Create))
            .unwrap();
        assert_eq!(out, MigrationSchema::default());
    }
}
