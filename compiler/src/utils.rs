use inflector::Inflector;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Parses a string-encoded numeric argument such as `"50"` or `" 2"`.
pub fn numeric_arg(arguments: &[String], index: usize) -> Option<usize> {
    arguments.get(index).and_then(|a| a.trim().parse::<usize>().ok())
}

/// Largest precision a database decimal column accepts.
pub const MAX_DIGITS: usize = 65;

/// A numeric argument used as a digit count. Counts above `MAX_DIGITS` are
/// treated as absent.
pub fn digits_arg(arguments: &[String], index: usize) -> Option<usize> {
    numeric_arg(arguments, index).filter(|digits| *digits <= MAX_DIGITS)
}

/// `user_id` -> `users`
pub fn table_from_foreign_key(key: &str) -> String {
    key.strip_suffix("_id").unwrap_or(key).to_plural()
}

/// `user_id` -> `User`
pub fn model_from_foreign_key(key: &str) -> String {
    key.strip_suffix("_id").unwrap_or(key).to_pascal_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_arg() {
        let args = vec!["5".to_string(), " 2".to_string(), "x".to_string()];
        assert_eq!(numeric_arg(&args, 0), Some(5));
        assert_eq!(numeric_arg(&args, 1), Some(2));
        assert_eq!(numeric_arg(&args, 2), None);
        assert_eq!(numeric_arg(&args, 3), None);
    }

    #[test]
    fn test_digits_arg_bound() {
        let args = vec!["65".to_string(), "66".to_string(), "18446744073709551615".to_string()];
        assert_eq!(digits_arg(&args, 0), Some(65));
        assert_eq!(digits_arg(&args, 1), None);
        assert_eq!(digits_arg(&args, 2), None);
    }

    #[test]
    fn test_foreign_key_names() {
        assert_eq!(table_from_foreign_key("user_id"), "users");
        assert_eq!(table_from_foreign_key("category_id"), "categories");
        assert_eq!(model_from_foreign_key("user_id"), "User");
        assert_eq!(model_from_foreign_key("blog_post_id"), "BlogPost");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("users"), "\"users\"");
    }
}
