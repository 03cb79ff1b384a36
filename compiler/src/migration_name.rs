use crate::types::{Action, MigrationMeta};

const CONNECTING_WORDS: [&str; 8] = ["to", "from", "and", "with", "for", "in", "of", "on"];

/// Splits a migration name like `add_age_to_users_table` into its action and
/// table. Never fails: an unusable name yields an empty table, which callers
/// must treat as an error.
pub fn parse_migration_name(name: &str) -> MigrationMeta {
    let mut segments: Vec<&str> = name.split('_').rev().collect();

    if segments.first() == Some(&"table") {
        segments.remove(0);
    }

    let action = Action::normalize(segments.pop().unwrap_or_default());

    let mut table: Vec<&str> = segments
        .into_iter()
        .take_while(|s| !CONNECTING_WORDS.contains(s))
        .collect();
    table.reverse();

    MigrationMeta {
        action,
        table: table.join("_"),
    }
}
