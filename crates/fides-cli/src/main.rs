//! Fides taxonomy CLI
//!
//! - `viz`: render a taxonomy as a sunburst/sankey/icicle figure (HTML or JSON)
//! - `list`: render a taxonomy as an indented list
//! - `generate-dataset`: introspect SQL DDL into Fides datasets
//! - `url`: print the server's visualize endpoint for a resource type

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fides_ingest_sql::{create_dataset, introspect, DdlCatalog};
use fides_taxonomy::{
    normalize, render_list, DuplicatePolicy, Hierarchy, IngestOptions, ListOptions, ListStyle,
    ResourceType, TaxonomyManifest,
};
use fides_viz::{render, FigureKind, PlotlyScript, RenderMode, View, VisualizeType};

mod config;

use config::FidesConfig;

#[derive(Parser)]
#[command(name = "fidesviz")]
#[command(author, version, about = "Fides taxonomy hierarchies: figures, lists and datasets")]
struct Cli {
    /// TOML config file (`[cli] server_url = ...`)
    #[arg(long, global = true, env = "FIDESCTL_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); `RUST_LOG` takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a taxonomy hierarchy as an interactive figure.
    ///
    /// Without `--view` the document carries all three views with a switcher;
    /// with it, only that view is drawn.
    Viz {
        /// Taxonomy JSON: an array of records or a manifest keyed by resource type
        input: PathBuf,
        #[arg(long, default_value = "data_category")]
        resource_type: String,
        /// Draw a single view (sunburst|sankey|icicle)
        #[arg(long)]
        view: Option<String>,
        #[arg(long, value_enum, default_value_t = VizFormat::Html)]
        format: VizFormat,
        /// Inline this plotly.js bundle instead of loading it from the CDN
        #[arg(long)]
        plotly_js: Option<PathBuf>,
        #[command(flatten)]
        ingest: IngestArgs,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a taxonomy hierarchy as an indented list.
    List {
        input: PathBuf,
        #[arg(long, default_value = "data_category")]
        resource_type: String,
        #[arg(long, value_enum, default_value_t = ListFormat::Html)]
        format: ListFormat,
        /// Indent level of the top-level entries (html only)
        #[arg(long, default_value_t = 1)]
        indent: usize,
        #[command(flatten)]
        ingest: IngestArgs,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate Fides datasets from SQL DDL (one dataset per schema).
    GenerateDataset {
        /// SQL file with CREATE TABLE statements
        input: PathBuf,
        /// Schema for unqualified table names
        #[arg(long, default_value = "public")]
        default_schema: String,
        /// Wrap every table into a single dataset with this key instead
        #[arg(long)]
        database: Option<String>,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the server's visualize URL for a resource type.
    Url {
        #[arg(long, default_value = "data_category")]
        resource_type: String,
        /// sankey|sunburst|text
        #[arg(long, default_value = "sankey")]
        visualize_type: String,
        /// Override the configured server URL
        #[arg(long)]
        server_url: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum VizFormat {
    Html,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ListFormat {
    Html,
    Plain,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct IngestArgs {
    /// Require each parent_key to equal the key's dot-prefix
    #[arg(long)]
    strict: bool,
    /// Let a repeated key replace the earlier record instead of failing
    #[arg(long)]
    allow_duplicates: bool,
    /// Resolve parent_key against records that appear later in the input
    #[arg(long)]
    allow_forward_parents: bool,
}

impl IngestArgs {
    fn options(&self) -> IngestOptions {
        IngestOptions {
            duplicates: if self.allow_duplicates {
                DuplicatePolicy::LastWins
            } else {
                DuplicatePolicy::Reject
            },
            require_prefix_parent: self.strict,
            allow_forward_parents: self.allow_forward_parents,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Viz {
            input,
            resource_type,
            view,
            format,
            plotly_js,
            ingest,
            out,
        } => cmd_viz(
            &input,
            &resource_type,
            view.as_deref(),
            format,
            plotly_js.as_deref(),
            &ingest,
            out.as_deref(),
        ),
        Commands::List {
            input,
            resource_type,
            format,
            indent,
            ingest,
            out,
        } => cmd_list(&input, &resource_type, format, indent, &ingest, out.as_deref()),
        Commands::GenerateDataset {
            input,
            default_schema,
            database,
            out,
        } => cmd_generate_dataset(&input, &default_schema, database.as_deref(), out.as_deref()),
        Commands::Url {
            resource_type,
            visualize_type,
            server_url,
        } => cmd_url(
            cli.config.as_deref(),
            &resource_type,
            &visualize_type,
            server_url.as_deref(),
        ),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_hierarchy(input: &Path, resource_type: ResourceType, ingest: &IngestArgs) -> Result<Hierarchy> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;
    let records = TaxonomyManifest::records_for(&value, resource_type)?;
    if records.is_empty() {
        tracing::warn!(input = %input.display(), %resource_type, "no records for resource type");
    }
    Ok(Hierarchy::ingest(records, &ingest.options())?)
}

fn emit(out: Option<&Path>, rendered: &str, summary: &str) -> Result<()> {
    emit_to(
        out,
        rendered,
        summary,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

/// The rendered document goes to `out` or stdout; the `wrote` summary goes to
/// stderr so stdout stays pipeable.
fn emit_to(
    out: Option<&Path>,
    rendered: &str,
    summary: &str,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(
                stderr,
                "{} {} ({summary})",
                "wrote".green().bold(),
                path.display().to_string().bold()
            )?;
        }
        None => writeln!(stdout, "{rendered}")?,
    }
    Ok(())
}

fn cmd_viz(
    input: &Path,
    resource_type: &str,
    view: Option<&str>,
    format: VizFormat,
    plotly_js: Option<&Path>,
    ingest: &IngestArgs,
    out: Option<&Path>,
) -> Result<()> {
    let resource_type: ResourceType = resource_type.parse()?;
    let hierarchy = load_hierarchy(input, resource_type, ingest)?;
    let indexed = hierarchy.indexed();

    let kind = match view {
        Some(v) => FigureKind::Single(v.parse::<View>()?),
        None => FigureKind::Combined,
    };
    let mode = match format {
        VizFormat::Json => RenderMode::Json,
        VizFormat::Html => match plotly_js {
            Some(path) => RenderMode::Document(PlotlyScript::Inline(
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read plotly bundle {}", path.display()))?,
            )),
            None => RenderMode::Document(PlotlyScript::Cdn),
        },
    };

    let rendered = render(&indexed, resource_type.as_str(), kind, &mode)?;
    emit(
        out,
        rendered.as_str(),
        &format!("nodes={} edges={}", indexed.len(), indexed.edges.len()),
    )
}

fn cmd_list(
    input: &Path,
    resource_type: &str,
    format: ListFormat,
    indent: usize,
    ingest: &IngestArgs,
    out: Option<&Path>,
) -> Result<()> {
    let resource_type: ResourceType = resource_type.parse()?;
    let hierarchy = load_hierarchy(input, resource_type, ingest)?;
    let forest = normalize(hierarchy.records());
    let options = ListOptions {
        style: match format {
            ListFormat::Html => ListStyle::Html,
            ListFormat::Plain => ListStyle::Plain,
        },
        indent,
    };
    let rendered = render_list(&forest, resource_type.as_str(), &options);
    emit(out, &rendered, &format!("entries={}", forest.node_count()))
}

fn cmd_generate_dataset(
    input: &Path,
    default_schema: &str,
    database: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let sql = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let source = DdlCatalog::parse(&sql, default_schema)
        .with_context(|| format!("failed to parse DDL in {}", input.display()))?;
    let mut datasets = introspect(&source)?;
    if let Some(database) = database {
        let collections = datasets.into_iter().flat_map(|ds| ds.collections).collect();
        datasets = vec![create_dataset(database, collections)];
    }
    let collections: usize = datasets.iter().map(|ds| ds.collections.len()).sum();
    let rendered = serde_json::to_string_pretty(&serde_json::json!({ "dataset": datasets }))?;
    emit(
        out,
        &rendered,
        &format!("datasets={} collections={collections}", datasets.len()),
    )
}

fn cmd_url(
    config_path: Option<&Path>,
    resource_type: &str,
    visualize_type: &str,
    server_url: Option<&str>,
) -> Result<()> {
    let resource_type: ResourceType = resource_type.parse()?;
    let kind: VisualizeType = visualize_type.parse()?;
    let base = match server_url {
        Some(s) => fides_viz::visualize::parse_server_url(s)?,
        None => FidesConfig::load(config_path)?.server_url()?,
    };
    let url = fides_viz::visualize_url(&base, resource_type.as_str(), kind)?;
    println!("{url}");
    Ok(())
}
