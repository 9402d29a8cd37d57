//! Command-line entrypoint: extract text from files and summarize it.
use anyhow::{Context, Result, bail};
use clap::Parser;
use docsum::{
    config::{self, SummarizerProvider},
    engine::{self, LengthConstraints, Sampling},
    extract::DocumentFormat,
    logging, provider,
    report::DocumentReport,
    runner::{self, Runner},
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "docsum",
    version,
    about = "Summarize plain text, PDF and DOCX documents with a pretrained model"
)]
struct Cli {
    /// Files or directories to summarize.
    paths: Vec<PathBuf>,
    /// Summarize this text directly instead of reading files.
    #[arg(long, conflicts_with = "paths")]
    text: Option<String>,
    /// Force an extractor (txt, pdf, docx) instead of dispatching on extension.
    #[arg(long, conflicts_with = "text")]
    format: Option<DocumentFormat>,
    /// Minimum summary length.
    #[arg(long)]
    min_length: Option<usize>,
    /// Maximum summary length.
    #[arg(long)]
    max_length: Option<usize>,
    /// Model backend (huggingface, ollama).
    #[arg(long, value_parser = parse_provider)]
    provider: Option<SummarizerProvider>,
    /// Model identifier.
    #[arg(long)]
    model: Option<String>,
    /// Allow sampled decoding instead of deterministic output.
    #[arg(long)]
    sample: bool,
    /// Emit one JSON record per document.
    #[arg(long)]
    json: bool,
    /// Print extracted text without loading a model.
    #[arg(long, conflicts_with = "text")]
    extract_only: bool,
}

fn parse_provider(value: &str) -> Result<SummarizerProvider, String> {
    value
        .parse()
        .map_err(|()| format!("unknown provider '{value}' (expected huggingface or ollama)"))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = config::init_config()
        .context("failed to load configuration")?
        .clone();
    logging::init_tracing(&config);

    if cli.text.is_none() && cli.paths.is_empty() {
        bail!("nothing to summarize: pass file paths or --text");
    }

    let inputs = runner::collect_inputs(&cli.paths, cli.format);
    if cli.extract_only {
        return Ok(print_extractions(&inputs, cli.format));
    }

    if let Some(provider) = cli.provider {
        config.summarizer_provider = provider;
    }
    if let Some(model) = cli.model.clone() {
        config.summarizer_model = model;
    }
    let constraints = LengthConstraints::new(
        cli.min_length.unwrap_or(config.summary_min_length),
        cli.max_length.unwrap_or(config.summary_max_length),
    );
    let sampling = if cli.sample {
        Sampling::Sampled
    } else {
        Sampling::Deterministic
    };

    let provider =
        provider::provider_from_config(&config).context("failed to construct model provider")?;
    let handle = engine::initialize(provider, &config.summarizer_model).await;
    if let Some(reason) = handle.load_failure() {
        eprintln!(
            "Failed to load model {}: {reason}. Check your connection or model name.",
            handle.model_id()
        );
    }

    let runner = Runner::new(&handle, constraints, sampling);
    if let Some(text) = cli.text.as_deref() {
        emit(&runner.run_text("<text>", text).await, cli.json)?;
    } else {
        for path in &inputs {
            emit(&runner.run_file(path, cli.format).await, cli.json)?;
        }
    }

    let snapshot = runner.metrics();
    tracing::info!(
        extracted = snapshot.documents_extracted,
        extraction_failures = snapshot.extraction_failures,
        summaries = snapshot.summaries_generated,
        summarization_failures = snapshot.summarization_failures,
        "Run finished"
    );

    Ok(if snapshot.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn emit(report: &DocumentReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    let format = report
        .format
        .map(|format| format.to_string())
        .unwrap_or_else(|| "-".into());
    match report.extracted_chars {
        Some(chars) => println!("== {} ({format}, {chars} chars)", report.source),
        None => println!("== {} ({format})", report.source),
    }
    match (&report.summary, &report.error) {
        (Some(summary), None) => println!("Summary: {summary}"),
        (_, Some(error)) => println!("Error: {error}"),
        (None, None) => {}
    }
    println!();
    Ok(())
}

fn print_extractions(inputs: &[PathBuf], format: Option<DocumentFormat>) -> ExitCode {
    let mut failed = false;
    for path in inputs {
        let format = format.or_else(|| DocumentFormat::from_path(path));
        match runner::extract_with(path, format) {
            Ok(text) => {
                println!("== {}", path.display());
                println!("{text}");
            }
            Err(error) => {
                failed = true;
                eprintln!("Error: {error}");
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_cannot_be_combined_with_inline_text() {
        let error = Cli::try_parse_from(["docsum", "--text", "Some text.", "--format", "pdf"])
            .err()
            .expect("conflicting flags");
        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn format_applies_to_paths() {
        let cli = Cli::try_parse_from(["docsum", "--format", "docx", "notes.bin"]).expect("cli");
        assert_eq!(cli.format, Some(DocumentFormat::Docx));
        assert_eq!(cli.paths, vec![PathBuf::from("notes.bin")]);
    }
}
