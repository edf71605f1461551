use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use lucidity::{AnalysisResult, Analyzer, Config, Level};

const SUPPORTED_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "text", "tex"];

#[derive(Parser, Debug)]
#[command(name = "lucidity")]
#[command(about = "Semantic clarity linter: flags vague, hedged, and unsupported prose")]
#[command(version)]
struct Args {
    /// Files or directories to analyze (.md, .txt, .tex)
    paths: Vec<PathBuf>,

    /// Strictness level: relaxed, standard, strict, academic
    #[arg(long, default_value = "standard")]
    level: String,

    /// Override the level's minimum density threshold
    #[arg(long)]
    min_density: Option<f64>,

    /// Domain terms exempt from vagueness/jargon checks (repeatable)
    #[arg(long = "domain-term")]
    domain_terms: Vec<String>,

    /// Only analyze paragraphs under these section headers (repeatable)
    #[arg(long = "section")]
    sections: Vec<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Exit nonzero when any document's density falls below this value
    #[arg(long)]
    fail_under: Option<f64>,

    /// Analyze paragraphs across a worker pool
    #[arg(long)]
    parallel: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.paths.is_empty() {
        anyhow::bail!("no input paths given");
    }

    let level: Level = args.level.parse()?;
    let mut config = Config::with_level(level);
    config.min_density = args.min_density;
    config.domain_terms = args.domain_terms.clone();
    config.sections = args.sections.clone();
    config.validate()?;

    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        anyhow::bail!("no supported files found (looking for: {})", SUPPORTED_EXTENSIONS.join(", "));
    }
    info!(files = files.len(), "starting analysis run");

    let analyzer = Analyzer::with_default_provider();
    let mut failed_threshold = false;

    for path in &files {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        let result = if args.parallel {
            analyzer.analyze_parallel(&text, &config, None)
        } else {
            analyzer.analyze(&text, &config)
        };

        let result = match result {
            Ok(r) => r,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "analysis failed");
                eprintln!("{}: {err}", path.display());
                failed_threshold = true;
                continue;
            }
        };

        match args.format.as_str() {
            "json" => print_json(path, &result)?,
            _ => print_text(path, &result),
        }

        if let Some(threshold) = args.fail_under {
            if result.summary.density < threshold {
                failed_threshold = true;
            }
        }
    }

    if failed_threshold {
        std::process::exit(1);
    }
    Ok(())
}

/// Expand paths: files kept as-is when supported, directories walked
/// recursively for supported extensions.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if !is_supported(path) {
                anyhow::bail!("unsupported file extension: {}", path.display());
            }
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && is_supported(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            anyhow::bail!("path does not exist: {}", path.display());
        }
    }
    Ok(files)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn print_json(path: &Path, result: &AnalysisResult) -> Result<()> {
    #[derive(serde::Serialize)]
    struct Report<'a> {
        path: String,
        result: &'a AnalysisResult,
    }
    let report = Report {
        path: path.display().to_string(),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(path: &Path, result: &AnalysisResult) {
    for paragraph in &result.paragraphs {
        for flag in &paragraph.flags {
            println!(
                "{}:{}:{} [{}] {}: {}",
                path.display(),
                flag.line,
                flag.column,
                flag.flag_type,
                flag.term,
                flag.message
            );
            println!("    suggestion: {}", flag.suggestion);
        }
    }
    let s = &result.summary;
    println!(
        "{}: density {:.2} ({}), {} flags across {} paragraphs, {} words",
        path.display(),
        s.density,
        s.density_grade,
        s.flag_count,
        s.paragraph_count,
        s.word_count
    );
    if s.degraded_paragraph_count > 0 {
        println!("  note: {} paragraph(s) degraded during annotation", s.degraded_paragraph_count);
    }
    for suggestion in &result.overall_suggestions {
        println!("  - {suggestion}");
    }
}
