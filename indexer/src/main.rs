use anyhow::Result;
use clap::{Parser, Subcommand};
use memsearch_core::builder::rebuild;
use memsearch_core::corpus::CorpusLayout;
use memsearch_core::keyword::{search_logged, KeywordHit, DEFAULT_MAX_RESULTS};
use memsearch_core::provider::{FileIndexProvider, IndexProvider};
use memsearch_core::query_log::QueryLog;
use memsearch_core::tokenizer::tokenize;
use memsearch_core::Index;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "memindex")]
#[command(about = "Build and query the keyword index over the notes workspace", long_about = None)]
struct Cli {
    /// Workspace root (defaults to $MEMSEARCH_WORKSPACE, then the current directory)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,
    /// Extra file to index, relative to the workspace root (repeatable)
    #[arg(long = "extra", global = true)]
    extra: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the index from scratch
    Build,
    /// Search the index, building it first if needed
    Search {
        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        limit: usize,
        /// Query terms
        query: Vec<String>,
    },
    /// Show what the current index contains
    Stats,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let layout = CorpusLayout::resolve(cli.workspace).with_extra_files(cli.extra);

    match cli.command {
        Commands::Build => build(&layout),
        Commands::Search { limit, query } => search(&layout, &query.join(" "), limit),
        Commands::Stats => stats(&layout),
    }
}

fn build(layout: &CorpusLayout) -> Result<()> {
    let index = rebuild(layout)?;
    println!("{}", build_summary(&index, layout));
    Ok(())
}

fn build_summary(index: &Index, layout: &CorpusLayout) -> String {
    format!(
        "indexed {} terms from {} files -> {}",
        index.terms.len(),
        index.files.len(),
        layout.index_path().display()
    )
}

fn search(layout: &CorpusLayout, query: &str, limit: usize) -> Result<()> {
    let provider = FileIndexProvider::new(layout.clone());
    let log = QueryLog::new(layout.query_log_path());
    if tokenize(query).is_empty() {
        println!("no valid search terms");
    }
    let hits = match search_logged(&provider, &log, query, limit) {
        Ok(hits) => hits,
        Err(err) => {
            tracing::error!(error = %err, "keyword search failed");
            Vec::new()
        }
    };
    tracing::info!(query, hits = hits.len(), "keyword search complete");
    print_hits(&hits);
    Ok(())
}

fn print_hits(hits: &[KeywordHit]) {
    print!("{}", render_hits(hits));
}

fn render_hits(hits: &[KeywordHit]) -> String {
    if hits.is_empty() {
        return "no results\n".to_string();
    }
    let mut out = format!("\nfound {} results:\n\n", hits.len());
    for hit in hits {
        out.push_str(&format!("[{:.1}] {}:{}\n", hit.score, hit.file, hit.line));
        out.push_str(&format!("  {}\n", hit.context));
        out.push_str(&format!("  matched: {}\n\n", hit.matched_terms.join(", ")));
    }
    out
}

fn stats(layout: &CorpusLayout) -> Result<()> {
    let index = FileIndexProvider::new(layout.clone()).index()?;
    println!("index: {}", layout.index_path().display());
    println!("built: {}", index.built);
    println!("terms: {}", index.terms.len());
    println!("files: {}", index.files.len());
    println!("postings: {}", index.num_postings());
    Ok(())
}
