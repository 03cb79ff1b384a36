use crate::{
    config::TypeConfig,
    error::CrudError,
    types::{Field, OptionValue, Options, Schema},
    utils::table_from_foreign_key,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TYPE_WITH_ARGUMENTS: Regex = Regex::new(r"^(.+?)\(([^)]+)\)").unwrap();
    static ref VALUED_OPTION:       Regex = Regex::new(r"(?i)([a-z]+)\(([^)]+)\)").unwrap();
}

/// Parses command line schemas such as `name:string(50), age:integer:nullable`.
pub struct SchemaParser<'a> {
    types: &'a TypeConfig,
}

impl<'a> SchemaParser<'a> {
    pub fn new(types: &'a TypeConfig) -> Self {
        SchemaParser { types }
    }

    pub fn parse(&self, text: &str) -> Result<Schema, CrudError> {
        let mut fields = Vec::new();

        for part in split_into_fields(text) {
            let mut field = self.parse_field(part)?;

            if field.options.remove("foreign").is_some() {
                let constraint = foreign_constraint(&field.name);
                tracing::debug!(
                    field = %field.name,
                    on = %table_from_foreign_key(&field.name),
                    "synthesized foreign constraint"
                );
                fields.push(field);
                fields.push(constraint);
                continue;
            }

            fields.push(field);
        }

        tracing::debug!(count = fields.len(), "parsed schema");
        Ok(Schema { fields })
    }

    fn parse_field(&self, text: &str) -> Result<Field, CrudError> {
        let mut segments = text.split(':').map(str::trim);

        let name     = segments.next().unwrap_or_default().to_string();
        let mut type_ = segments.next().unwrap_or_default().to_string();
        let options  = parse_options(segments);

        // Arguments such as `decimal(5,2)`
        let mut arguments = Vec::new();
        if let Some(caps) = TYPE_WITH_ARGUMENTS.captures(&type_) {
            arguments = caps[2].split(',').map(|a| a.trim().to_string()).collect();
            type_ = caps[1].to_string();
        }

        if !self.types.is_blueprint(&type_) {
            return Err(CrudError::InvalidColumnType(type_));
        }

        Ok(Field { name, type_, arguments, options })
    }
}

/// Parse with the built-in type lists.
pub fn parse_schema(text: &str) -> Result<Schema, CrudError> {
    SchemaParser::new(TypeConfig::builtin()).parse(text)
}

/// Splits on commas that are not inside parentheses, so `decimal(5,2)` stays
/// in one piece. Blank pieces are dropped.
fn split_into_fields(text: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut depth  = 0usize;
    let mut start  = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fields.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&text[start..]);

    fields
        .into_iter()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

fn parse_options<'t>(tokens: impl Iterator<Item = &'t str>) -> Options {
    let mut options = Options::new();

    for token in tokens.filter(|t| !t.is_empty()) {
        if token.contains('(') {
            if let Some(caps) = VALUED_OPTION.captures(token) {
                options.insert(&caps[1], OptionValue::Value(caps[2].to_string()));
                continue;
            }
        }
        // `useCurrent()` is a flag as well
        let name = token.strip_suffix("()").unwrap_or(token);
        options.insert(name, OptionValue::Flag);
    }

    options
}

/// `user_id` -> `user_id:foreign:references('id'):on('users')`
fn foreign_constraint(key: &str) -> Field {
    let mut options = Options::new();
    options.insert("references", OptionValue::Value("'id'".to_string()));
    options.insert(
        "on",
        OptionValue::Value(format!("'{}'", table_from_foreign_key(key))),
    );

    Field {
        name:      key.to_string(),
        type_:     "foreign".to_string(),
        arguments: Vec::new(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_respects_parentheses() {
        let parts = split_into_fields("amount:decimal(5,2), name:string(50):default('a,b'),age:integer");
        assert_eq!(
            parts,
            vec!["amount:decimal(5,2)", "name:string(50):default('a,b')", "age:integer"]
        );
    }

    #[test]
    fn test_split_drops_blank_pieces() {
        assert_eq!(split_into_fields("name:string, "), vec!["name:string"]);
        assert!(split_into_fields("   ").is_empty());
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(
            ["nullable", "default('guest')", "useCurrent()", "default('admin')"].into_iter(),
        );
        assert_eq!(options.len(), 3);
        assert_eq!(options.get("nullable"), Some(&OptionValue::Flag));
        assert_eq!(options.get("default"), Some(&OptionValue::Value("'admin'".into())));
        assert_eq!(options.get("useCurrent"), Some(&OptionValue::Flag));
        let names: Vec<&str> = options.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["nullable", "default", "useCurrent"]);
    }

    #[test]
    fn test_parse_arguments() {
        let schema = parse_schema("price:decimal(8, 2)").unwrap();
        assert_eq!(schema.fields[0].type_, "decimal");
        assert_eq!(schema.fields[0].arguments, vec!["8", "2"]);
    }

    #[test]
    fn test_unknown_option_is_kept() {
        let schema = parse_schema("email:string:unique:whatever").unwrap();
        assert!(schema.fields[0].options.contains("unique"));
        assert!(schema.fields[0].options.contains("whatever"));
    }

    #[test]
    fn test_invalid_type() {
        let err = parse_schema("name:varchar").unwrap_err();
        assert!(
            matches!(err, CrudError::InvalidColumnType(ref t) if t == "varchar"),
            "expected InvalidColumnType but got {:?}",
            err
        );
    }

    #[test]
    fn test_invalid_type_after_argument_stripping() {
        let err = parse_schema("name:varchar(20)").unwrap_err();
        assert!(matches!(err, CrudError::InvalidColumnType(ref t) if t == "varchar"));
    }

    #[test]
    fn test_missing_type() {
        let err = parse_schema("name").unwrap_err();
        assert!(matches!(err, CrudError::InvalidColumnType(ref t) if t.is_empty()));
    }

    #[test]
    fn test_custom_whitelist() {
        let mut types = TypeConfig::default();
        types.blueprint_types.push("citext".to_string());
        let schema = SchemaParser::new(&types).parse("slug:citext").unwrap();
        assert_eq!(schema.fields[0].type_, "citext");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_schema("").unwrap().is_empty());
    }
}
