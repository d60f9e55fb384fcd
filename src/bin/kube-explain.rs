//! kube-explain CLI
//!
//! Command-line interface for documenting Kubernetes API fields and
//! reformatting `kubectl explain` output.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use kube_explain::{
    document_reference, format_explain, load_schema_auto, object_kind, parse_document, read_text,
    resolve_path, DocumentLanguage, ExplainError, ExplainOptions,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kube-explain")]
#[command(about = "Document Kubernetes API fields from a swagger schema")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain a dotted field path, e.g. Deployment.metadata.labels
    Field {
        /// Schema source: file path or URL (http:// or https://)
        schema: String,

        /// Field path starting with a Kind
        path: String,

        /// Version prefix to try when looking up the Kind (repeatable, in order)
        #[arg(long = "api-version")]
        api_versions: Vec<String>,

        /// Output the structured explanation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reformat `kubectl explain` output as markdown
    Format {
        /// File holding the explain output (stdin if not specified)
        file: Option<PathBuf>,

        /// Output as a tagged JSON value
        #[arg(long)]
        json: bool,
    },

    /// Show the field under a line of a manifest
    Hover {
        /// Manifest file (JSON or YAML)
        document: PathBuf,

        /// Line number, 1-based
        #[arg(long)]
        line: usize,

        /// Document markup (default: from file extension)
        #[arg(long, value_enum)]
        language: Option<LanguageArg>,

        /// Schema source; when given, print the field's documentation
        #[arg(long)]
        schema: Option<String>,

        /// Version prefix to try when looking up the Kind (repeatable, in order)
        #[arg(long = "api-version")]
        api_versions: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LanguageArg {
    Json,
    Yaml,
}

impl From<LanguageArg> for DocumentLanguage {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Json => DocumentLanguage::Json,
            LanguageArg::Yaml => DocumentLanguage::Yaml,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Field {
            schema,
            path,
            api_versions,
            json,
        } => run_field(&schema, &path, api_versions, json),

        Commands::Format { file, json } => run_format(file, json),

        Commands::Hover {
            document,
            line,
            language,
            schema,
            api_versions,
        } => run_hover(HoverArgs {
            document,
            line,
            language,
            schema,
            api_versions,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Log to stderr so stdout stays clean; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_field(
    schema_source: &str,
    path: &str,
    api_versions: Vec<String>,
    json: bool,
) -> Result<(), u8> {
    let schema = load_schema_auto(schema_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let options = ExplainOptions::new().api_versions(api_versions);
    print_explanation(&schema, path, &options, json)
}

fn print_explanation(
    schema: &Value,
    path: &str,
    options: &ExplainOptions,
    json: bool,
) -> Result<(), u8> {
    match resolve_path(schema, path, options) {
        Ok(explanation) => {
            if json {
                let output = serde_json::to_string_pretty(&explanation).map_err(|e| {
                    eprintln!("Error serializing output: {}", e);
                    2u8
                })?;
                println!("{}", output);
            } else {
                println!("{}", explanation);
            }
            Ok(())
        }
        Err(err) => {
            report_explain_error(&err, json);
            Err(err.exit_code() as u8)
        }
    }
}

/// Output an explain failure as rendered markdown or JSON.
fn report_explain_error(err: &ExplainError, json: bool) {
    if json {
        let output = serde_json::json!({
            "error": err.to_string(),
            "field": err.subject(),
        });
        println!("{}", output);
    } else {
        println!("{}", err.render());
    }
}

fn run_format(file: Option<PathBuf>, json: bool) -> Result<(), u8> {
    let raw = match file {
        Some(path) => read_text(&path).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).map_err(|e| {
                eprintln!("Error reading stdin: {}", e);
                3u8
            })?;
            buffer
        }
    };

    let formatted = format_explain(&raw);
    if json {
        let output = serde_json::to_string(&formatted).map_err(|e| {
            eprintln!("Error serializing output: {}", e);
            2u8
        })?;
        println!("{}", output);
    } else {
        println!("{}", formatted.as_str());
    }
    Ok(())
}

struct HoverArgs {
    document: PathBuf,
    line: usize,
    language: Option<LanguageArg>,
    schema: Option<String>,
    api_versions: Vec<String>,
}

fn run_hover(args: HoverArgs) -> Result<(), u8> {
    let HoverArgs {
        document,
        line,
        language,
        schema,
        api_versions,
    } = args;

    let Some(language) = language
        .map(DocumentLanguage::from)
        .or_else(|| DocumentLanguage::from_path(&document))
    else {
        eprintln!(
            "Error: cannot infer markup of {}; use --language",
            document.display()
        );
        return Err(2);
    };

    if line == 0 {
        eprintln!("Error: line numbers start at 1");
        return Err(2);
    }

    let text = read_text(&document).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    // Parse up front so a broken manifest is reported rather than ignored.
    let parsed = parse_document(&text, language).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    if object_kind(&parsed).is_none() {
        eprintln!("Error: not a Kubernetes API object (no kind)");
        return Err(2);
    }

    let Some(reference) = document_reference(&parsed, &text, language, line - 1) else {
        eprintln!("Error: no field on line {}", line);
        return Err(1);
    };

    match schema {
        Some(source) => {
            let schema = load_schema_auto(&source).map_err(|e| {
                eprintln!("Error: {}", e);
                e.exit_code() as u8
            })?;
            let options = ExplainOptions::new().api_versions(api_versions);
            print_explanation(&schema, &reference, &options, false)
        }
        None => {
            println!("{}", reference);
            Ok(())
        }
    }
}
