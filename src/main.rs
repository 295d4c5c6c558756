//! Command-line interface for csdl-examples

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use csdl_examples::{ExampleGenerator, Limits, Loader, Location, ResourceAssembler, Schema};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "csdl-examples")]
#[command(author, version, about = "Generate JSON examples from OData CSDL metadata", long_about = None)]
struct Cli {
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Maximum number of nested types expanded into one example
    #[arg(long, global = true, value_name = "DEPTH")]
    max_depth: Option<usize>,

    /// Maximum approximate size in bytes of one example
    #[arg(long, global = true, value_name = "BYTES")]
    max_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every complex and entity type declared in the metadata
    Types {
        /// Metadata files (or inline CSDL text)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },

    /// Generate example JSON for the declared types
    Generate {
        /// Metadata files (or inline CSDL text)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Print only the example of this fully-qualified type
        #[arg(short = 't', long = "type", value_name = "NAME")]
        type_name: Option<String>,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut limits = Limits::default();
    if let Some(depth) = cli.max_depth {
        limits = limits.with_max_type_depth(depth);
    }
    if let Some(size) = cli.max_size {
        limits = limits.with_max_example_size(size);
    }

    let result = match cli.command {
        Commands::Types { files } => cmd_types(&files, limits),
        Commands::Generate {
            files,
            type_name,
            pretty,
        } => cmd_generate(&files, type_name, pretty, limits),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn load(files: &[String], limits: &Limits) -> csdl_examples::Result<Vec<Schema>> {
    let locations: Vec<Location> = files.iter().map(|f| Location::from_arg(f)).collect();
    Loader::new().with_limits(limits.clone()).load_schemas(&locations)
}

#[cfg(feature = "cli")]
fn cmd_types(files: &[String], limits: Limits) -> Result<(), Box<dyn std::error::Error>> {
    let schemas = load(files, &limits)?;

    for schema in &schemas {
        for ty in &schema.complex_types {
            println!("{} (complex)", schema.qualified_name(&ty.name));
        }
        for ty in &schema.entity_types {
            println!("{} (entity)", schema.qualified_name(ty.name()));
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_generate(
    files: &[String],
    type_name: Option<String>,
    pretty: bool,
    limits: Limits,
) -> Result<(), Box<dyn std::error::Error>> {
    let schemas = load(files, &limits)?;

    let json_str = if let Some(type_name) = type_name {
        let generated = ExampleGenerator::new(&schemas)
            .with_limits(limits)
            .generate_traced(&type_name);
        for issue in &generated.issues {
            tracing::warn!(%issue, "example contains a datatype fallback");
        }
        if pretty {
            generated.value.to_json_string_pretty()?
        } else {
            generated.value.to_json_string()?
        }
    } else {
        let resources = ResourceAssembler::new(&schemas)
            .with_limits(limits)
            .with_pretty(pretty)
            .assemble()?;
        if pretty {
            serde_json::to_string_pretty(&resources)?
        } else {
            serde_json::to_string(&resources)?
        }
    };

    println!("{}", json_str);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
