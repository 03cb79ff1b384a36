use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crudgen::{append_log, schema_to_json, write_files, GeneratedFile, Generator};
use crudgen_compiler::{CrudError, GeneratorConfig, SchemaParser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CONFIG: &str = "crudgen.toml";

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "Generate CRUD scaffolding from a column schema", long_about = None)]
struct Cli {
    /// Configuration file (defaults to `crudgen.toml` when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not record the invocation in the command log
    #[arg(long, global = true)]
    no_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Resource {
    /// Singular model name, e.g. `BlogPost`
    name: String,

    /// Column schema, e.g. `title:string(150), body:text:nullable`
    #[arg(short, long)]
    schema: String,

    /// Write below this directory instead of printing to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(short, long)]
    force: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a schema and print it as JSON
    Parse {
        #[arg(short, long)]
        schema: String,
    },

    /// Generate a migration, e.g. `add_age_to_users_table`
    Migration {
        /// Migration name
        name: String,

        #[arg(short, long)]
        schema: String,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        force: bool,
    },

    /// Generate a pivot table migration between two tables
    Pivot {
        table_one: String,

        table_two: String,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        force: bool,
    },

    /// Generate an Eloquent model
    Model {
        #[command(flatten)]
        resource: Resource,

        /// Use the API model template
        #[arg(long)]
        api: bool,

        /// Add a server-side datatables listing
        #[arg(short, long)]
        datatables: bool,
    },

    /// Generate a form request with validation rules
    Request {
        #[command(flatten)]
        resource: Resource,
    },

    /// Generate a model factory
    Factory {
        #[command(flatten)]
        resource: Resource,
    },

    /// Generate a translation file
    Lang {
        #[command(flatten)]
        resource: Resource,

        #[arg(long, default_value = "en")]
        locale: String,
    },

    /// Generate one Blade view (`index`, `create`, `edit` or `show`)
    View {
        #[command(flatten)]
        resource: Resource,

        view: String,
    },

    /// Generate a feature test
    Test {
        #[command(flatten)]
        resource: Resource,

        #[arg(long)]
        api: bool,
    },

    /// Generate a web controller, or an API controller with OpenAPI annotations
    Controller {
        #[command(flatten)]
        resource: Resource,

        #[arg(long)]
        api: bool,

        #[arg(short, long)]
        datatables: bool,
    },

    /// Print the route declarations for a resource
    Routes {
        /// Singular model name
        name: String,

        #[arg(long)]
        api: bool,

        #[arg(short, long)]
        datatables: bool,
    },

    /// Generate every artifact of a resource
    Crud {
        #[command(flatten)]
        resource: Resource,

        #[arg(long)]
        api: bool,

        #[arg(short, long)]
        datatables: bool,
    },
}

fn main() -> Result<(), CrudError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    if !cli.no_log {
        let line = std::env::args().collect::<Vec<_>>().join(" ");
        if let Err(e) = append_log(&config, &line) {
            tracing::warn!(error = %e, "unable to write command log");
        }
    }

    match &cli.command {
        Commands::Parse { schema } => {
            let schema = SchemaParser::new(&config.types).parse(schema)?;
            println!("{}", schema_to_json(&schema)?);
            Ok(())
        }

        Commands::Migration { name, schema, output, force } => {
            // The migration names its own table; the resource name is not rendered.
            let gen = Generator::new(&config, name)?;
            let schema = gen.parse(schema)?;
            let file = gen.migration(name, &schema)?;
            emit(&[file], output.as_deref(), *force)
        }

        Commands::Pivot { table_one, table_two, output, force } => {
            let gen = Generator::new(&config, table_one)?;
            let file = gen.migration_pivot(table_one, table_two)?;
            emit(&[file], output.as_deref(), *force)
        }

        Commands::Model { resource, api, datatables } => {
            run(&config, resource, *datatables, |gen, schema| gen.model(schema, *api))
        }

        Commands::Request { resource } => run(&config, resource, false, |gen, schema| gen.request(schema)),

        Commands::Factory { resource } => run(&config, resource, false, |gen, schema| gen.factory(schema)),

        Commands::Lang { resource, locale } => {
            run(&config, resource, false, |gen, schema| gen.lang(schema, locale))
        }

        Commands::View { resource, view } => {
            run(&config, resource, false, |gen, schema| gen.view(view, schema))
        }

        Commands::Test { resource, api } => {
            run(&config, resource, false, |gen, schema| gen.test(schema, *api))
        }

        Commands::Controller { resource, api, datatables } => {
            run(&config, resource, *datatables, |gen, schema| gen.controller(schema, *api))
        }

        Commands::Routes { name, api, datatables } => {
            let gen = Generator::new(&config, name)?.with_datatables(*datatables);
            println!("{}", gen.routes(*api));
            Ok(())
        }

        Commands::Crud { resource, api, datatables } => {
            let gen = Generator::new(&config, &resource.name)?.with_datatables(*datatables);
            let schema = gen.parse(&resource.schema)?;
            let files = gen.crud(&schema, *api);

            let root = resource.output.clone().unwrap_or_else(|| PathBuf::from("."));
            emit(&files, Some(&root), resource.force)?;

            let routes_file = if *api { "routes/api.php" } else { "routes/web.php" };
            println!("\nAdd to {}:\n{}", routes_file, gen.routes(*api));
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, CrudError> {
    match path {
        Some(path) => GeneratorConfig::load(path),
        None if Path::new(DEFAULT_CONFIG).exists() => GeneratorConfig::load(Path::new(DEFAULT_CONFIG)),
        None => Ok(GeneratorConfig::default()),
    }
}

fn run<F>(config: &GeneratorConfig, resource: &Resource, datatables: bool, render: F) -> Result<(), CrudError>
where
    F: FnOnce(&Generator, &crudgen::Schema) -> Result<GeneratedFile, CrudError>,
{
    let gen = Generator::new(config, &resource.name)?.with_datatables(datatables);
    let schema = gen.parse(&resource.schema)?;
    let file = render(&gen, &schema)?;
    emit(&[file], resource.output.as_deref(), resource.force)
}

fn emit(files: &[GeneratedFile], output: Option<&Path>, force: bool) -> Result<(), CrudError> {
    match output {
        Some(root) => {
            for path in write_files(root, files, force)? {
                println!("Created {}", path.display());
            }
        }
        None => {
            for file in files {
                println!("{}", file.contents);
            }
        }
    }
    Ok(())
}
