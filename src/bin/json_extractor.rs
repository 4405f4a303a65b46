use anyhow::{Context, Result};
use clap::Parser;
use field_extractor::{Extractor, FieldKind};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract structured fields line by line with JSON output")]
struct Args {
    /// Path to the text file to scan
    #[arg(index = 1)]
    file_path: PathBuf,

    /// Process only first N lines (default: 1000)
    #[arg(short, long, default_value = "1000")]
    limit: usize,

    /// Output JSON file path
    #[arg(short, long, default_value = "findings.json")]
    output: PathBuf,

    /// Kinds to extract (comma-separated, default: all)
    #[arg(short, long)]
    kinds: Option<String>,

    /// Show a progress bar
    #[arg(short, long)]
    progress: bool,
}

#[derive(Debug, Serialize)]
struct Finding {
    line: usize,
    kind: FieldKind,
    start: usize,
    end: usize,
    value: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,field_extractor=info,json_extractor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let kinds: BTreeSet<FieldKind> = match &args.kinds {
        Some(list) => FieldKind::parse_list(list)?.into_iter().collect(),
        None => FieldKind::ALL.into_iter().collect(),
    };

    info!(path = %args.file_path.display(), "processing file");
    let file = File::open(&args.file_path)
        .with_context(|| format!("failed to open {}", args.file_path.display()))?;
    let reader = BufReader::with_capacity(1_000_000, file);

    let pb = if args.progress {
        let pb = ProgressBar::new(args.limit as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({eta})")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let extractor = Extractor::builtin()?;
    let mut findings = Vec::new();
    let mut line_count = 0;

    for line in reader.lines().take(args.limit) {
        let line = line?;
        line_count += 1;
        for m in extractor.find_matches(&line, kinds.iter().copied())? {
            findings.push(Finding {
                line: line_count,
                kind: m.kind,
                start: m.start,
                end: m.end,
                value: m.normalized,
            });
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(findings = findings.len(), lines = line_count, "scan finished");
    let json_output = serde_json::to_string_pretty(&findings)?;
    std::fs::write(&args.output, json_output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "Found {} fields in {} lines, results written to {}",
        findings.len(),
        line_count,
        args.output.display()
    );

    Ok(())
}
