use std::path::PathBuf;

use inflector::Inflector;

use crudgen_compiler::{
    builders::{
        ApiSyntaxBuilder, FactorySyntaxBuilder, LangSyntaxBuilder, MigrationSyntaxBuilder,
        ModelSyntaxBuilder, RequestSyntaxBuilder, TestSyntaxBuilder, ViewSyntaxBuilder,
    },
    parse_migration_name, substitute, CrudError, GeneratorConfig, Schema, SchemaParser, Stubs,
};

use crate::names::Names;

/// Views generated for a web (non-API) resource.
pub use crudgen_compiler::builders::VIEWS as WEB_VIEWS;

const API_ROUTES: &str =
    "Route::apiResource('{{routeName}}', App\\Http\\Controllers\\Api\\{{modelName}}Controller::class);";

const DATATABLES_ROUTE: &str =
    "Route::get('/{{routeName}}/data', [App\\Http\\Controllers\\{{modelName}}Controller::class, 'data'])->name('{{routeName}}.data');";

const WEB_ROUTES: &str = "\
Route::get('/{{routeName}}/{{{objectName}}}/delete', [App\\Http\\Controllers\\{{modelName}}Controller::class, 'delete'])->name('{{routeName}}.delete');
Route::resource('{{routeName}}', App\\Http\\Controllers\\{{modelName}}Controller::class);";

/// A rendered file, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path:     PathBuf,
    pub contents: String,
}

/// Renders the artifacts of one resource.
pub struct Generator<'a> {
    config:    &'a GeneratorConfig,
    stubs:     Stubs,
    names:      Names,
    timestamp:  String,
    datatables: bool,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig, name: &str) -> Result<Self, CrudError> {
        let stubs = match &config.custom_stubs {
            Some(dir) => Stubs::with_custom_dir(dir),
            None      => Stubs::embedded(),
        };

        Ok(Generator {
            config,
            stubs,
            names: Names::new(name)?,
            timestamp: chrono::Local::now().format("%Y_%m_%d_%H%M%S").to_string(),
            datatables: false,
        })
    }

    /// Renders web listings for server-side datatables.
    pub fn with_datatables(mut self, datatables: bool) -> Self {
        self.datatables = datatables;
        self
    }

    /// Fixes the migration file prefix.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn names(&self) -> &Names {
        &self.names
    }

    /// Parses a schema with the configured types. An empty schema is refused.
    pub fn parse(&self, text: &str) -> Result<Schema, CrudError> {
        let schema = SchemaParser::new(&self.config.types).parse(text)?;
        if schema.is_empty() {
            return Err(CrudError::MissingSchema);
        }
        Ok(schema)
    }

    pub fn migration(&self, migration_name: &str, schema: &Schema) -> Result<GeneratedFile, CrudError> {
        let meta = parse_migration_name(migration_name);
        if meta.table.is_empty() {
            return Err(CrudError::InvalidName(migration_name.to_string()));
        }

        let bodies = MigrationSyntaxBuilder::new(&self.stubs).create(schema, &meta)?;

        let mut stub = self.stubs.get("database/migrations/migration.stub")?.into_owned();
        stub = substitute(&stub, "class", &migration_name.to_pascal_case());
        stub = substitute(&stub, "schema_up", &bodies.up);
        stub = substitute(&stub, "schema_down", &bodies.down);
        stub = substitute(&stub, "table", &meta.table);

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("database/migrations/{}_{}.php", self.timestamp, migration_name)),
            contents: stub,
        })
    }

    pub fn model(&self, schema: &Schema, api: bool) -> Result<GeneratedFile, CrudError> {
        let fragments = ModelSyntaxBuilder::new(&self.stubs).create(schema)?;

        let path = match (api, self.datatables) {
            (true, _)      => "app/ApiModel.stub",
            (false, true)  => "app/WebModelDatatables.stub",
            (false, false) => "app/WebModel.stub",
        };
        let mut stub = self.stubs.get(path)?.into_owned();
        stub = substitute(&stub, "column", &fragments.column);
        stub = substitute(&stub, "foreign", &fragments.foreign);
        stub = substitute(&stub, "searchables", &fragments.searchable);

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("app/Models/{}.php", self.names.model)),
            contents: self.fill(&stub),
        })
    }

    pub fn request(&self, schema: &Schema) -> Result<GeneratedFile, CrudError> {
        let stub = RequestSyntaxBuilder::new(&self.config.types, &self.stubs).create(schema)?;

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("app/Http/Requests/{}Request.php", self.names.model)),
            contents: self.fill(&stub),
        })
    }

    pub fn factory(&self, schema: &Schema) -> Result<GeneratedFile, CrudError> {
        let stub = FactorySyntaxBuilder::new(&self.config.types, &self.stubs).create(schema)?;

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("database/factories/{}Factory.php", self.names.model)),
            contents: self.fill(&stub),
        })
    }

    pub fn lang(&self, schema: &Schema, locale: &str) -> Result<GeneratedFile, CrudError> {
        let stub = LangSyntaxBuilder::new(&self.stubs).create(schema)?;

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("resources/lang/{}/{}.php", locale, self.names.table)),
            contents: self.fill(&stub),
        })
    }

    pub fn view(&self, view_name: &str, schema: &Schema) -> Result<GeneratedFile, CrudError> {
        let stub = ViewSyntaxBuilder::new(&self.config.types, &self.stubs, view_name).create(schema)?;

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("resources/views/{}/{}.blade.php", self.names.table, view_name)),
            contents: self.fill(&stub),
        })
    }

    pub fn test(&self, schema: &Schema, api: bool) -> Result<GeneratedFile, CrudError> {
        let stub = TestSyntaxBuilder::new(&self.stubs).create(schema, api)?;

        let namespace = if self.config.namespace == "App" {
            "Tests".to_string()
        } else {
            format!("{}\\Tests", self.config.namespace)
        };
        let stub = substitute(&stub, "namespace", &namespace);

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("tests/Feature/{}Test.php", self.names.model)),
            contents: self.fill(&stub),
        })
    }

    pub fn api_controller(&self, schema: &Schema) -> Result<GeneratedFile, CrudError> {
        let stub = ApiSyntaxBuilder::new(&self.config.types, &self.stubs).create(schema)?;

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("app/Http/Controllers/Api/{}Controller.php", self.names.model)),
            contents: self.fill(&stub),
        })
    }

    /// `web_controller` or `api_controller`.
    pub fn controller(&self, schema: &Schema, api: bool) -> Result<GeneratedFile, CrudError> {
        if api {
            self.api_controller(schema)
        } else {
            self.web_controller()
        }
    }

    pub fn web_controller(&self) -> Result<GeneratedFile, CrudError> {
        let mut stub = self.stubs.get("app/Http/Controllers/WebController.stub")?.into_owned();

        let action = if self.datatables {
            self.stubs.get("app/Http/Controllers/DatatablesAction.stub")?.into_owned()
        } else {
            String::new()
        };
        stub = substitute(&stub, "datatables", &action);

        Ok(GeneratedFile {
            path:     PathBuf::from(format!("app/Http/Controllers/{}Controller.php", self.names.model)),
            contents: self.fill(&stub),
        })
    }

    /// Route declarations to add to `routes/api.php` or `routes/web.php`.
    pub fn routes(&self, api: bool) -> String {
        let routes = if api {
            API_ROUTES.to_string()
        } else if self.datatables {
            format!("{}\n{}", DATATABLES_ROUTE, WEB_ROUTES)
        } else {
            WEB_ROUTES.to_string()
        };

        self.fill(&routes)
    }

    /// A many-to-many table between `table_one` and `table_two`, named after
    /// both singulars in alphabetical order (`post_tag`).
    pub fn migration_pivot(&self, table_one: &str, table_two: &str) -> Result<GeneratedFile, CrudError> {
        let mut tables = [table_one.trim().to_lowercase(), table_two.trim().to_lowercase()];
        if let Some(empty) = tables.iter().find(|t| t.is_empty()) {
            return Err(CrudError::InvalidName(empty.clone()));
        }

        let mut singulars = [tables[0].to_singular(), tables[1].to_singular()];
        singulars.sort();
        tables.sort();

        let pivot = singulars.join("_");
        let class = format!(
            "Create{}{}PivotTable",
            singulars[0].to_pascal_case(),
            singulars[1].to_pascal_case()
        );

        let replacements = [
            ("class", class.as_str()),
            ("pivotTableName", pivot.as_str()),
            ("columnOne", singulars[0].as_str()),
            ("columnTwo", singulars[1].as_str()),
            ("tableOne", tables[0].as_str()),
            ("tableTwo", tables[1].as_str()),
        ];
        let stub = self.stubs.get("database/migrations/pivot.stub")?;
        let contents = replacements
            .iter()
            .fold(stub.into_owned(), |acc, (placeholder, value)| substitute(&acc, placeholder, value));

        Ok(GeneratedFile {
            path:     PathBuf::from(format!(
                "database/migrations/{}_create_{}_pivot_table.php",
                self.timestamp, pivot
            )),
            contents,
        })
    }

    /// Every artifact of the resource. A failing artifact is logged and
    /// skipped so the rest still gets generated.
    pub fn crud(&self, schema: &Schema, api: bool) -> Vec<GeneratedFile> {
        let migration_name = format!("create_{}_table", self.names.table);

        let mut results = vec![
            ("migration", self.migration(&migration_name, schema)),
            ("model", self.model(schema, api)),
            ("factory", self.factory(schema)),
            ("request", self.request(schema)),
            ("lang", self.lang(schema, "en")),
        ];

        results.push(("controller", self.controller(schema, api)));
        if !api {
            for view in WEB_VIEWS {
                results.push(("view", self.view(view, schema)));
            }
        }
        results.push(("test", self.test(schema, api)));

        results
            .into_iter()
            .filter_map(|(artifact, result)| match result {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!(artifact, model = %self.names.model, error = %e, "unable to generate");
                    None
                }
            })
            .collect()
    }

    /// Fills the resource-level placeholders shared by every stub.
    fn fill(&self, stub: &str) -> String {
        let replacements = [
            ("modelNamePlural", self.names.model_plural.as_str()),
            ("modelNamespace", self.config.model_namespace.as_str()),
            ("modelName", self.names.model.as_str()),
            ("namespace", self.config.namespace.as_str()),
            ("tableName", self.names.table.as_str()),
            ("routeName", self.names.route.as_str()),
            ("objectName", self.names.object.as_str()),
            ("packageRouteName", ""),
        ];

        replacements
            .iter()
            .fold(stub.to_string(), |acc, (placeholder, value)| substitute(&acc, placeholder, value))
    }
}
