use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use field_extractor::cleaner::CleanText;
use field_extractor::config::Config;
use field_extractor::report::Summary;
use field_extractor::stats;
use field_extractor::{Extractor, FieldKind};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extract structured fields (emails, phones, URLs, dates, ...) from text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a UTF-8 text file
    #[arg(index = 1, conflicts_with = "text")]
    file_path: Option<PathBuf>,

    /// Process this text instead of a file
    #[arg(short, long)]
    text: Option<String>,

    /// Extract only these kinds (comma-separated)
    #[arg(short, long)]
    kinds: Option<String>,

    /// Exclude specific kinds (comma-separated)
    #[arg(short, long)]
    exclude: Option<String>,

    /// Run the cleaning pipeline and report what it removed
    #[arg(long)]
    clean: bool,

    /// Lowercase the cleaned text
    #[arg(long)]
    lowercase: bool,

    /// Show text statistics (ignored with --json)
    #[arg(long)]
    stats: bool,

    /// Show the most common words (ignored with --json)
    #[arg(long)]
    frequency: bool,

    /// Print the extraction result as JSON
    #[arg(long)]
    json: bool,

    /// Values shown per kind in the summary
    #[arg(short, long)]
    limit: Option<usize>,

    /// Write the processed text to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON config file with defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List every match with its byte offsets
    #[arg(short, long)]
    verbose: bool,
}

const TOP_WORDS: usize = 10;

/// Colored status lines; silent when stdout carries JSON.
struct Console {
    quiet: bool,
}

impl Console {
    fn header(&self, msg: &str) {
        if !self.quiet {
            println!("\n{}", style("=".repeat(60)).cyan());
            println!("{}", style(msg).cyan().bold());
            println!("{}\n", style("=".repeat(60)).cyan());
        }
    }

    fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), style(msg).green());
        }
    }

    fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").cyan(), style(msg).cyan());
        }
    }

    fn warning(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), style(msg).yellow());
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,field_extractor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_input(args: &Args, console: &Console) -> Result<String> {
    match (&args.file_path, &args.text) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            console.success(&format!("Loaded text from {}", path.display()));
            Ok(text)
        }
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => bail!("provide either a FILE or --text"),
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run(Args::parse()) {
        eprintln!("{} {}", style("✗").red(), style(format!("{:#}", err)).red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let console = Console { quiet: args.json };

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(kinds) = &args.kinds {
        config.kinds = FieldKind::parse_list(kinds)?;
    }
    if let Some(exclude) = &args.exclude {
        config.exclude.extend(FieldKind::parse_list(exclude)?);
    }
    if args.lowercase {
        config.clean.lowercase = true;
    }
    let limit = args.limit.unwrap_or(config.summary_limit);

    let text = read_input(&args, &console)?;
    console.info(&format!(
        "Original text: {} characters, {} words",
        text.chars().count(),
        text.split_whitespace().count()
    ));

    let mut processed = text.clone();
    if args.clean {
        console.header("CLEANING TEXT");
        let cleaned = CleanText::pipeline(&text, &config.clean);
        let report = cleaned.report();
        console.success(&format!(
            "Cleaned: {} → {} chars",
            report.original_length, report.final_length
        ));
        console.info(&format!("Removed {} characters", report.chars_removed));
        for step in &report.steps {
            debug!(step = step.step, removed = step.chars_removed, "cleaning step");
        }
        processed = cleaned.into_text();
    }

    if args.frequency && !args.json {
        console.header(&format!("TOP {} MOST COMMON WORDS", TOP_WORDS));
        for (rank, (word, count)) in stats::word_frequency(&processed)
            .into_iter()
            .take(TOP_WORDS)
            .enumerate()
        {
            println!("  {}. {}: {}", rank + 1, word, count);
        }
    }

    if args.stats && !args.json {
        console.header("TEXT STATISTICS");
        let s = stats::statistics(&processed);
        println!("  Total characters: {}", s.total_characters);
        println!("  Total words: {}", s.total_words);
        println!("  Unique words: {}", s.unique_words);
        println!("  Total sentences: {}", s.total_sentences);
        println!("  Avg word length: {}", s.avg_word_length);
        println!("  Avg sentence length: {:.1} words", s.avg_sentence_length);
        println!("  Lexical diversity: {:.2}%", s.lexical_diversity * 100.0);
    }

    let kinds = config.resolve_kinds();
    if kinds.is_empty() {
        console.warning("Every field kind is excluded, nothing to extract");
    }
    info!(kinds = kinds.len(), "extracting structured fields");

    // Extraction runs on the original text; cleaning would strip the fields.
    let extractor = Extractor::builtin()?;
    if args.verbose && !args.json {
        for m in extractor.find_matches(&text, kinds.iter().copied())? {
            println!("  [{}] {}..{} {:?} => {}", m.kind, m.start, m.end, m.raw, m.normalized);
        }
    }
    let result = extractor.extract(&text, kinds)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        console.header("INFORMATION EXTRACTION");
        if result.is_empty() {
            console.warning("No structured information found (emails, phones, URLs, etc.)");
        } else {
            println!("{}", Summary::new(&result).limit(limit));
        }
    }

    if let Some(output) = &args.output {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(output, &processed)
            .with_context(|| format!("failed to write {}", output.display()))?;
        console.success(&format!("Saved processed text to {}", output.display()));
    }

    Ok(())
}
