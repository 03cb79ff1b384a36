use crate::{
    builders::{join_non_empty, newline_indent},
    config::{Category, TypeConfig},
    error::CrudError,
    template::{substitute, Stubs},
    types::{Field, Schema},
    utils::{digits_arg, model_from_foreign_key},
};

/// Builds the fake-data definitions of a model factory.
pub struct FactorySyntaxBuilder<'a> {
    types: &'a TypeConfig,
    stubs: &'a Stubs,
}

impl<'a> FactorySyntaxBuilder<'a> {
    pub fn new(types: &'a TypeConfig, stubs: &'a Stubs) -> Self {
        FactorySyntaxBuilder { types, stubs }
    }

    pub fn create(&self, schema: &Schema) -> Result<String, CrudError> {
        if schema.is_empty() {
            return Ok(String::new());
        }

        let stub = self.stubs.get("database/factories/factory.stub")?;
        Ok(substitute(&stub, "column", &self.columns(schema)))
    }

    pub fn columns(&self, schema: &Schema) -> String {
        join_non_empty(schema.iter().map(|f| self.add_column(f)), &newline_indent(8))
    }

    fn add_column(&self, field: &Field) -> String {
        if field.is_foreign_constraint() {
            return format!(
                "'{}' => factory({{{{modelNamespace}}}}\\{}::class),",
                field.name,
                model_from_foreign_key(&field.name)
            );
        }

        // Key columns are filled through their constraint.
        if field.name.find("_id").is_some_and(|at| at > 0) {
            return String::new();
        }

        format!("'{}' => $faker->{},", field.name, self.faker(field))
    }

    /// `text(50)`, `randomNumber()`, `randomFloat(2, 0, 999.99)`, `date()`
    pub fn faker(&self, field: &Field) -> String {
        let category = self.types.category(&field.type_);

        let mut call = match category {
            Some(Category::Integer) => "randomNumber(".to_string(),
            Some(Category::Float)   => "randomFloat(".to_string(),
            Some(Category::Date)    => "date(".to_string(),
            Some(Category::String) | None => "text(".to_string(),
        };

        if category == Some(Category::Float) {
            if let (Some(precision), Some(scale)) =
                (digits_arg(&field.arguments, 0), digits_arg(&field.arguments, 1))
            {
                call.push_str(&format!(
                    "{}, 0, {}.{}",
                    scale,
                    "9".repeat(precision.saturating_sub(scale)),
                    "9".repeat(scale)
                ));
            }
        } else if !field.arguments.is_empty() {
            call.push_str(&field.arguments.join(", "));
        }

        call.push(')');
        call
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn columns(schema: &str) -> String {
        let stubs = Stubs::embedded();
        FactorySyntaxBuilder::new(TypeConfig::builtin(), &stubs).columns(&parse_schema(schema).unwrap())
    }

    #[test]
    fn test_faker_by_category() {
        assert_eq!(columns("name:string(50)"), "'name' => $faker->text(50),");
        assert_eq!(columns("age:integer"), "'age' => $faker->randomNumber(),");
        assert_eq!(columns("born_at:date"), "'born_at' => $faker->date(),");
        assert_eq!(columns("active:boolean"), "'active' => $faker->text(),");
    }

    #[test]
    fn test_float_range() {
        assert_eq!(columns("price:decimal(5,2)"), "'price' => $faker->randomFloat(2, 0, 999.99),");
        assert_eq!(columns("ratio:float"), "'ratio' => $faker->randomFloat(),");
    }

    #[test]
    fn test_oversized_float_arguments() {
        assert_eq!(
            columns("price:decimal(18446744073709551615,1)"),
            "'price' => $faker->randomFloat(),"
        );
        assert_eq!(columns("price:decimal(8,900)"), "'price' => $faker->randomFloat(),");
    }

    #[test]
    fn test_foreign_keys() {
        assert_eq!(
            columns("title:string, blog_post_id:integer:foreign"),
            "'title' => $faker->text(),\n        \
             'blog_post_id' => factory({{modelNamespace}}\\BlogPost::class),"
        );
    }

    #[test]
    fn test_id_heuristic() {
        assert_eq!(columns("owner_id:integer"), "");
        assert_eq!(columns("_identifier:string"), "'_identifier' => $faker->text(),");
    }

    #[test]
    fn test_empty_schema() {
        let stubs = Stubs::embedded();
        let out = FactorySyntaxBuilder::new(TypeConfig::builtin(), &stubs)
            .create(&Schema::default())
            .unwrap();
        assert!(out.is_empty());
    }
}
