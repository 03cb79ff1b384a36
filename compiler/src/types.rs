use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Value of a column option: `nullable` is a flag, `references('id')` carries
/// its raw (already quoted) argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag,
    Value(String),
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Flag     => serializer.serialize_bool(true),
            OptionValue::Value(v) => serializer.serialize_str(v),
        }
    }
}

/// Column options in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(Vec<(String, OptionValue)>);

impl Options {
    pub fn new() -> Self {
        Options(Vec::new())
    }

    /// Inserts or overwrites an option. An overwritten option keeps its
    /// original position.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None        => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        let index = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Options {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name:      String,
    #[serde(rename = "type")]
    pub type_:     String,
    pub arguments: Vec<String>,
    pub options:   Options,
}

impl Field {
    pub fn is_nullable(&self) -> bool {
        self.options.contains("nullable")
    }

    /// The synthesized `foreign` column that carries a reference constraint.
    pub fn is_foreign_constraint(&self) -> bool {
        self.type_ == "foreign"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item     = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    Add,
    Remove,
    Other(String),
}

impl Action {
    /// Maps an action word onto one of the recognized actions.
    pub fn normalize(token: &str) -> Action {
        match token {
            "create" | "make"                        => Action::Create,
            "remove" | "delete" | "destroy" | "drop" => Action::Remove,
            "add" | "append" | "update" | "insert"   => Action::Add,
            other                                    => Action::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::Create   => "create",
            Action::Add      => "add",
            Action::Remove   => "remove",
            Action::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationMeta {
    pub action: Action,
    pub table:  String,
}
