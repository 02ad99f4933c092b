use std::{
    fs::{self, read_to_string},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use jack_analyzer::{
    display_error,
    lexer::lexer::{tokenize, tokens_xml},
    parser::parser::{parse_source, ParserConfig, DEFAULT_MAX_DEPTH},
};

/// Checks Jack source files against the Jack grammar and writes their parse
/// trees as XML.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// A `.jack` file or a directory of them
    path: PathBuf,

    /// Directory for the generated files (defaults to next to each source)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write the flat token listing as `<Name>T.xml`
    #[arg(short, long)]
    tokens: bool,

    /// Deepest expression and statement nesting accepted
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!("{:#}", error);
            ExitCode::FAILURE
        }
    }
}

/// Analyzes every input; returns whether all of them parsed.
fn run(args: &Args) -> Result<bool> {
    let start = Instant::now();
    let config = ParserConfig {
        max_depth: args.max_depth,
    };

    let sources = collect_sources(&args.path)?;
    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let mut all_ok = true;
    for source_path in &sources {
        all_ok &= analyze_file(source_path, args, config)?;
    }

    tracing::info!("analyzed {} file(s) in {:?}", sources.len(), start.elapsed());
    Ok(all_ok)
}

fn analyze_file(path: &Path, args: &Args, config: ParserConfig) -> Result<bool> {
    let source =
        read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let out_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    if args.tokens {
        let listing = tokens_xml(&tokenize(source.clone()));
        write_output(&out_dir.join(format!("{}T.xml", stem)), &listing)?;
    }

    match parse_source(&source, config) {
        Ok(parsed) => {
            tracing::debug!(
                "{}: class {} with {} subroutine(s), {} call(s)",
                path.display(),
                parsed.name,
                parsed.subroutines.len(),
                parsed.calls.len()
            );
            write_output(&out_dir.join(format!("{}.xml", stem)), &parsed.trace.to_xml())?;
            Ok(true)
        }
        Err(error) => {
            display_error(&error, &source, path);
            Ok(false)
        }
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

fn collect_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        bail!("{} is neither a file nor a directory", path.display());
    }

    let mut sources = vec![];
    for entry in fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))? {
        let entry_path = entry?.path();
        if entry_path.extension().is_some_and(|ext| ext == "jack") {
            sources.push(entry_path);
        }
    }
    sources.sort();

    if sources.is_empty() {
        bail!("no .jack files in {}", path.display());
    }

    Ok(sources)
}
