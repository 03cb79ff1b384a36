//! Type classification and generator configuration.
//!
//! The type whitelist and its four categories are plain data. A built-in copy
//! is created once per process; a `crudgen.toml` file may replace any list.
//!
//! ```toml
//! model_namespace = "App\\Models"
//! custom_stubs    = "stubs/crudgen"
//!
//! [types]
//! string_types = ["char", "string", "text", "citext"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::CrudError;

const STRING_TYPES: &[&str] = &[
    "char", "string", "text", "mediumText", "longText", "json", "jsonb",
];

const INTEGER_TYPES: &[&str] = &[
    "increments", "integerIncrements", "tinyIncrements", "smallIncrements", "mediumIncrements", "bigIncrements",
    "integer", "tinyInteger", "smallInteger", "mediumInteger", "bigInteger",
    "unsignedInteger", "unsignedTinyInteger", "unsignedSmallInteger", "unsignedMediumInteger", "unsignedBigInteger",
];

const FLOAT_TYPES: &[&str] = &["float", "double", "decimal", "unsignedDecimal"];

const DATE_TYPES: &[&str] = &[
    "date", "dateTime", "dateTimeTz",
    "time", "timeTz", "timestamp", "timestampTz", "timestamps",
    "timestampsTz", "softDeletes", "softDeletesTz",
    "year",
];

const BLUEPRINT_TYPES: &[&str] = &[
    "increments", "integerIncrements", "tinyIncrements", "smallIncrements", "mediumIncrements", "bigIncrements",
    "char", "string", "text", "mediumText", "longText",
    "integer", "tinyInteger", "smallInteger", "mediumInteger", "bigInteger",
    "unsignedInteger", "unsignedTinyInteger", "unsignedSmallInteger", "unsignedMediumInteger", "unsignedBigInteger",
    "float", "double", "decimal", "unsignedDecimal",
    "boolean",
    "enum", "set",
    "json", "jsonb",
    "date", "dateTime", "dateTimeTz",
    "time", "timeTz", "timestamp", "timestampTz", "timestamps",
    "timestampsTz", "softDeletes", "softDeletesTz",
    "year",
    "binary",
    "uuid",
    "ipAddress",
    "macAddress",
    "geometry", "point", "lineString", "polygon", "geometryCollection", "multiPoint", "multiLineString", "multiPolygon", "multiPolygonZ",
    "computed",
    "morphs", "nullableMorphs", "uuidMorphs", "nullableUuidMorphs",
    "rememberToken",
    "foreign",
];

lazy_static! {
    static ref BUILTIN_TYPES: TypeConfig = TypeConfig::default();
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Coarse semantic class of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    String,
    Integer,
    Float,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeConfig {
    pub string_types:    Vec<String>,
    pub integer_types:   Vec<String>,
    pub float_types:     Vec<String>,
    pub date_types:      Vec<String>,
    pub blueprint_types: Vec<String>,
}

impl Default for TypeConfig {
    fn default() -> Self {
        TypeConfig {
            string_types:    owned(STRING_TYPES),
            integer_types:   owned(INTEGER_TYPES),
            float_types:     owned(FLOAT_TYPES),
            date_types:      owned(DATE_TYPES),
            blueprint_types: owned(BLUEPRINT_TYPES),
        }
    }
}

impl TypeConfig {
    /// The built-in lists, shared for the lifetime of the process.
    pub fn builtin() -> &'static TypeConfig {
        &BUILTIN_TYPES
    }

    pub fn is_string(&self, type_: &str) -> bool {
        self.string_types.iter().any(|t| t == type_)
    }

    pub fn is_integer(&self, type_: &str) -> bool {
        self.integer_types.iter().any(|t| t == type_)
    }

    pub fn is_float(&self, type_: &str) -> bool {
        self.float_types.iter().any(|t| t == type_)
    }

    pub fn is_date(&self, type_: &str) -> bool {
        self.date_types.iter().any(|t| t == type_)
    }

    pub fn is_blueprint(&self, type_: &str) -> bool {
        self.blueprint_types.iter().any(|t| t == type_)
    }

    /// First category containing `type_`, checked in the order string,
    /// integer, float, date. `None` for types like `boolean` or `uuid`.
    pub fn category(&self, type_: &str) -> Option<Category> {
        if self.is_string(type_) {
            Some(Category::String)
        } else if self.is_integer(type_) {
            Some(Category::Integer)
        } else if self.is_float(type_) {
            Some(Category::Float)
        } else if self.is_date(type_) {
            Some(Category::Date)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub types:           TypeConfig,
    /// Directory whose files shadow the embedded stubs of the same name.
    pub custom_stubs:    Option<PathBuf>,
    pub namespace:       String,
    pub model_namespace: String,
    pub log_file:        String,
    pub log_dir:         PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            types:           TypeConfig::default(),
            custom_stubs:    None,
            namespace:       "App".to_string(),
            model_namespace: "App\\Models".to_string(),
            log_file:        "crudgen".to_string(),
            log_dir:         PathBuf::from("storage/logs"),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml(text: &str) -> Result<Self, CrudError> {
        toml::from_str(text).map_err(|e| CrudError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, CrudError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded generator configuration");
        Ok(config)
    }
}
