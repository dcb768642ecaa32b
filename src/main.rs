// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use corpus_search::utils::logging::{format_heading, format_success, format_warning};
use corpus_search::{
    Config, CorpusIndex, CorpusPipeline, DocumentSummary, JsonExporter, LoadReport, QueryEngine,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "corpus_search")]
#[command(version)]
#[command(about = "Keyword index and search over a directory of markdown articles", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Corpus root, overrides `corpus.root` from the configuration
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Query a previously exported index instead of loading the corpus
    #[arg(short, long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[arg(long, action = ArgAction::SetTrue)]
    progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find articles containing any of the keywords
    Query {
        keyword: String,

        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// List articles carrying a tag
    Tag {
        tag: String,

        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Print one article in its markdown layout
    Show { id: String },

    Stats,

    Export {
        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long, value_name = "ID")]
        document: Option<String>,
    },
}

/// A queryable index plus the load report, absent when read from a snapshot.
struct LoadedCorpus {
    index: CorpusIndex,
    report: Option<LoadReport>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    colored::control::set_override(cli.color);
    corpus_search::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    if !cli.config.exists() {
        warn!(
            "Config file {} not found, using built-in defaults",
            cli.config.display()
        );
    }
    let mut config =
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;

    if let Some(root) = &cli.root {
        config.corpus.root = root.clone();
    }

    let corpus = load_corpus(&config, cli.snapshot.as_deref(), cli.progress).await?;

    match cli.command {
        Commands::Query {
            keyword,
            limit,
            json,
        } => {
            let limit = limit.unwrap_or(config.query.default_limit);
            let results: Vec<_> = QueryEngine::new(&corpus.index)
                .search(&keyword)
                .take(limit)
                .collect();
            print_results(&keyword, &results, json)?;
        }
        Commands::Tag { tag, limit, json } => {
            let limit = limit.unwrap_or(config.query.default_limit);
            let results: Vec<_> = QueryEngine::new(&corpus.index)
                .search_tag(&tag)
                .take(limit)
                .collect();
            print_results(&tag, &results, json)?;
        }
        Commands::Show { id } => {
            let document = corpus
                .index
                .lookup(&id)
                .with_context(|| format!("No document with id {}", id))?;
            print!("{}", document.to_markdown());
        }
        Commands::Stats => cmd_stats(&corpus),
        Commands::Export {
            output,
            pretty,
            document,
        } => {
            let exporter = JsonExporter::new(output).context("Failed to create export directory")?;
            if let Some(id) = document {
                let path = exporter.export_single(&corpus.index, &id, pretty)?;
                println!("{}", format_success(&format!("Exported {}", path.display())));
            } else {
                let manifest = exporter
                    .export_index(&corpus.index, pretty)
                    .context("Failed to export index")?;
                println!(
                    "{}",
                    format_success(&format!(
                        "Exported {} documents ({} tokens)",
                        manifest.total_documents, manifest.total_tokens
                    ))
                );
            }
        }
    }

    Ok(())
}

async fn load_corpus(
    config: &Config,
    snapshot: Option<&Path>,
    progress: bool,
) -> Result<LoadedCorpus> {
    if let Some(path) = snapshot {
        let index = JsonExporter::load_snapshot(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        return Ok(LoadedCorpus {
            index,
            report: None,
        });
    }

    let root = config.corpus.root.clone();
    info!("Loading corpus from {}", root.display());

    let pipeline = CorpusPipeline::new(config.clone()).with_progress(progress);
    let (index, report) = pipeline
        .run_parallel(&root)
        .await
        .with_context(|| format!("Failed to load corpus from {}", root.display()))?;

    Ok(LoadedCorpus {
        index,
        report: Some(report),
    })
}

fn print_results(query: &str, results: &[DocumentSummary], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for: \"{}\"", query);
        return Ok(());
    }

    println!(
        "{}",
        format_heading(&format!(
            "Found {} result(s) for \"{}\"",
            results.len(),
            query
        ))
    );
    for (idx, result) in results.iter().enumerate() {
        println!("{}. {}", idx + 1, result.format_summary());
    }

    Ok(())
}

fn cmd_stats(corpus: &LoadedCorpus) {
    println!("{}", format_heading("Corpus statistics"));
    println!("  Documents: {}", corpus.index.len());
    println!("  Tokens:    {}", corpus.index.token_count());

    let Some(report) = &corpus.report else {
        println!("  Source:    snapshot");
        return;
    };

    println!(
        "  Skipped:   {} ({:.1}% parsed)",
        report.skipped.len(),
        report.stats.success_rate()
    );
    println!(
        "  Loaded in {} ms ({:.1} files/s, {} bytes)",
        report.stats.duration_ms,
        report.stats.files_per_second(),
        report.stats.total_bytes_processed
    );

    for skipped in &report.skipped {
        println!(
            "{}",
            format_warning(&format!("{}: {}", skipped.relative_path, skipped.reason))
        );
    }
}
