use inflector::Inflector;

use crudgen_compiler::CrudError;

/// Naming conventions derived from a singular model name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// `BlogPost`
    pub model:        String,
    /// `BlogPosts`
    pub model_plural: String,
    /// `blog_posts`
    pub table:        String,
    /// `blog-posts`
    pub route:        String,
    /// `blog_post`
    pub object:       String,
}

impl Names {
    pub fn new(name: &str) -> Result<Self, CrudError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CrudError::InvalidName(name.to_string()));
        }

        let model  = name.to_pascal_case();
        let object = model.to_snake_case();
        let table  = object.to_plural();

        Ok(Names {
            model_plural: table.to_pascal_case(),
            route:        table.to_kebab_case(),
            model,
            table,
            object,
        })
    }
}
