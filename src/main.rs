//! CLI entry point for `ddl2xml`.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use ddl2xml::generator::talend_xml::{self, DEFAULT_DBMS_ID};
use ddl2xml::mapping::type_map::TypeMap;
use ddl2xml::output::{formatter, report};
use ddl2xml::parser::column_extractor::{self, ErrorPolicy};
use ddl2xml::parser::normalizer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ddl2xml",
    about = "Convert a Teradata CREATE TABLE statement into Talend schema metadata XML"
)]
struct Cli {
    /// Input DDL file
    input: PathBuf,

    /// Output XML file
    output: PathBuf,

    /// JSON object of extra or overriding type mappings, e.g. {"BLOB": "id_byte[]"}
    #[arg(long)]
    type_map: Option<PathBuf>,

    /// Start from an empty type map instead of the built-in Teradata mapping
    #[arg(long)]
    empty_type_map: bool,

    /// Value of the schema's dbmsId attribute
    #[arg(long, default_value = DEFAULT_DBMS_ID)]
    dbms_id: String,

    /// What to do when a column cannot be converted: fail-fast or best-effort
    #[arg(long, default_value = "fail-fast")]
    on_error: ErrorPolicy,

    /// Also write a Markdown conversion report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Stage 1: Type map
    let mut type_map = if cli.empty_type_map {
        TypeMap::default()
    } else {
        TypeMap::teradata()
    };
    if let Some(path) = &cli.type_map {
        tracing::info!("Loading type map {}...", path.display());
        let loaded = formatter::read_text(path).and_then(|json| type_map.load_from_json(&json));
        if let Err(e) = loaded {
            tracing::error!("{e}");
            process::exit(2);
        }
    }
    tracing::debug!(types = type_map.len(), "type map ready");

    // Stage 2: Read input
    tracing::info!("Reading from input file {}...", cli.input.display());
    let raw = match formatter::read_text(&cli.input) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("{e}");
            process::exit(2);
        }
    };

    // Stage 3: Extract columns
    tracing::info!("Fetching column data from DDL...");
    let normalized = normalizer::normalize(&raw);
    let extraction = column_extractor::extract_columns(&normalized, &type_map, cli.on_error);

    for column in &extraction.columns {
        tracing::debug!(
            name = %column.name,
            raw_type = %column.raw_type,
            size = column.size.as_deref().unwrap_or(""),
            precision = column.precision.as_deref().unwrap_or(""),
            "column"
        );
    }
    for diagnostic in &extraction.diagnostics {
        tracing::warn!(kind = %diagnostic.kind(), "{diagnostic}");
    }

    // Stage 4: Build report; it is written even when the conversion is abandoned
    let report_content = cli
        .report
        .as_ref()
        .map(|_| report::build_report(&source_name(&cli.input), &extraction, &type_map));

    if extraction.is_fatal() || extraction.aborted || extraction.columns.is_empty() {
        if let (Some(path), Some(content)) = (&cli.report, &report_content) {
            if let Err(e) = formatter::write_text(path, content) {
                tracing::error!("{e}");
            }
        }
        tracing::error!("Unable to create the XML output: no usable column list");
        process::exit(2);
    }
    tracing::info!(
        "Column list created successfully ({} columns)",
        extraction.columns.len()
    );

    // Stage 5: Render and write XML
    tracing::info!(
        "Generating XML and writing the data to {}...",
        cli.output.display()
    );
    let xml = match talend_xml::render_schema(&extraction.columns, &type_map, &cli.dbms_id) {
        Ok(xml) => xml,
        Err(e) => {
            tracing::error!("{e}");
            process::exit(2);
        }
    };

    let report_target = cli.report.as_deref().zip(report_content.as_deref());
    if let Err(e) = formatter::write_output(&cli.output, &xml, report_target) {
        tracing::error!("{e}");
        process::exit(2);
    }
    tracing::info!("The XML file was created successfully.");

    if !extraction.is_clean() {
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("input")
        .to_string()
}
