use clap::Parser;
use scrapexpath::{DocumentQuery, DocumentType, QueryError, QueryOptions, ResultValue};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// Run an XPath 1.0 expression against an XML or HTML document and print
/// the matches, one per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The XPath 1.0 expression to evaluate
    expression: String,

    /// Document to read. Reads stdin when absent or `-`
    file: Option<PathBuf>,

    /// Document type: xml or html
    #[arg(long = "type", value_name = "TYPE")]
    doc_type: Option<DocumentType>,

    /// Pick the document type from a MIME type, e.g. `text/html`
    #[arg(long, value_name = "MIME")]
    content_type: Option<String>,

    /// Bind a namespace prefix (repeatable)
    #[arg(short, long = "namespace", value_name = "PREFIX=URI", value_parser = parse_binding)]
    namespace: Vec<(String, String)>,

    /// Bind a variable; numeric values are bound as numbers (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    var: Vec<(String, String)>,

    /// Print the results as a JSON array
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Query(_) => ExitCode::from(1),
            CliError::Read { .. } | CliError::Write(_) => ExitCode::from(2),
        }
    }
}

fn parse_binding(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn variable_value(raw: &str) -> ResultValue {
    let n = scrapexpath_xpath1::parse_number(raw);
    if n.is_nan() {
        ResultValue::Text(raw.to_string())
    } else {
        ResultValue::Number(n)
    }
}

fn reads_stdin(file: Option<&Path>) -> bool {
    file.is_none_or(|path| path == Path::new("-"))
}

fn document_type(args: &Args) -> DocumentType {
    if let Some(doc_type) = args.doc_type {
        return doc_type;
    }
    if let Some(content_type) = &args.content_type {
        return DocumentType::from_content_type(content_type);
    }
    match args.file.as_deref() {
        Some(path) if !reads_stdin(Some(path)) => DocumentType::from_path(path),
        _ => DocumentType::default(),
    }
}

fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    if reads_stdin(file) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        return Ok(text);
    }
    let path = file.unwrap_or(Path::new("-"));
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut options = QueryOptions::default();
    for (prefix, uri) in &args.namespace {
        options = options.with_namespace(prefix, uri);
    }
    for (name, raw) in &args.var {
        options = options.with_variable(name, variable_value(raw));
    }

    let doc_type = document_type(args);
    let text = read_input(args.file.as_deref())?;
    log::info!("Querying {} bytes of {} with '{}'", text.len(), doc_type, args.expression);

    let results = DocumentQuery::new(options).query(&text, doc_type, &args.expression)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer(&mut out, &results).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        for value in &results {
            writeln!(out, "{}", value)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
