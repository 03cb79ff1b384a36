use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CrudError;

/// Replaces every `{{placeholder}}` in `template` with `value`, verbatim.
pub fn substitute(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(&format!("{{{{{}}}}}", placeholder), value)
}

/// Looks up the stubs compiled into the binary.
pub fn embedded_stub(path: &str) -> Option<&'static str> {
    let stub = match path.trim_start_matches('/') {
        "database/migrations/migration.stub"      => include_str!("../stubs/database/migrations/migration.stub"),
        "database/migrations/schema-create.stub"  => include_str!("../stubs/database/migrations/schema-create.stub"),
        "database/migrations/schema-change.stub"  => include_str!("../stubs/database/migrations/schema-change.stub"),
        "database/migrations/pivot.stub"          => include_str!("../stubs/database/migrations/pivot.stub"),
        "database/factories/factory.stub"         => include_str!("../stubs/database/factories/factory.stub"),
        "app/ColumnModel.stub"                    => include_str!("../stubs/app/ColumnModel.stub"),
        "app/SearchablesModel.stub"               => include_str!("../stubs/app/SearchablesModel.stub"),
        "app/ForeignModel.stub"                   => include_str!("../stubs/app/ForeignModel.stub"),
        "app/WebModel.stub"                       => include_str!("../stubs/app/WebModel.stub"),
        "app/WebModelDatatables.stub"             => include_str!("../stubs/app/WebModelDatatables.stub"),
        "app/ApiModel.stub"                       => include_str!("../stubs/app/ApiModel.stub"),
        "app/Http/Requests/Request.stub"          => include_str!("../stubs/app/Http/Requests/Request.stub"),
        "app/Http/Controllers/ApiController.stub" => include_str!("../stubs/app/Http/Controllers/ApiController.stub"),
        "app/Http/Controllers/WebController.stub" => include_str!("../stubs/app/Http/Controllers/WebController.stub"),
        "app/Http/Controllers/DatatablesAction.stub" => include_str!("../stubs/app/Http/Controllers/DatatablesAction.stub"),
        "resources/lang/lang.stub"                => include_str!("../stubs/resources/lang/lang.stub"),
        "resources/views/index.blade.stub"        => include_str!("../stubs/resources/views/index.blade.stub"),
        "resources/views/create.blade.stub"       => include_str!("../stubs/resources/views/create.blade.stub"),
        "resources/views/edit.blade.stub"         => include_str!("../stubs/resources/views/edit.blade.stub"),
        "resources/views/show.blade.stub"         => include_str!("../stubs/resources/views/show.blade.stub"),
        "resources/views/elements/text.blade.stub"     => include_str!("../stubs/resources/views/elements/text.blade.stub"),
        "resources/views/elements/textarea.blade.stub" => include_str!("../stubs/resources/views/elements/textarea.blade.stub"),
        "resources/views/elements/number.blade.stub"   => include_str!("../stubs/resources/views/elements/number.blade.stub"),
        "resources/views/elements/decimal.blade.stub"  => include_str!("../stubs/resources/views/elements/decimal.blade.stub"),
        "resources/views/elements/date.blade.stub"     => include_str!("../stubs/resources/views/elements/date.blade.stub"),
        "tests/Feature/WebTest.stub"              => include_str!("../stubs/tests/Feature/WebTest.stub"),
        "tests/Feature/ApiTest.stub"              => include_str!("../stubs/tests/Feature/ApiTest.stub"),
        _ => return None,
    };
    Some(stub)
}

/// Resolves stub templates, preferring a custom directory over the embedded
/// set when one is configured.
#[derive(Debug, Clone, Default)]
pub struct Stubs {
    custom_dir: Option<PathBuf>,
}

impl Stubs {
    pub fn embedded() -> Self {
        Stubs { custom_dir: None }
    }

    pub fn with_custom_dir(dir: impl Into<PathBuf>) -> Self {
        Stubs { custom_dir: Some(dir.into()) }
    }

    pub fn custom_dir(&self) -> Option<&Path> {
        self.custom_dir.as_deref()
    }

    pub fn get(&self, path: &str) -> Result<Cow<'static, str>, CrudError> {
        let relative = path.trim_start_matches('/');

        if let Some(dir) = &self.custom_dir {
            let custom = dir.join(relative);
            if custom.is_file() {
                tracing::debug!(stub = %custom.display(), "using custom stub");
                return Ok(Cow::Owned(fs::read_to_string(custom)?));
            }
        }

        embedded_stub(relative)
            .map(Cow::Borrowed)
            .ok_or_else(|| CrudError::StubNotFound(relative.to_string()))
    }
}
