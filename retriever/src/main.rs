use anyhow::Result;
use clap::Parser;
use memsearch_core::corpus::CorpusLayout;
use memsearch_core::tfidf::{search, Idf, PassageHit, TfIdfOptions, DEFAULT_MAX_RESULTS};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Rank heading-scoped passages of the notes workspace with TF-IDF.
#[derive(Parser)]
#[command(name = "memsearch")]
struct Args {
    /// Emit the ranked results as a JSON array
    #[arg(long)]
    json: bool,
    /// Maximum number of results
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    limit: usize,
    /// Use smoothed IDF = ln(1 + N/df) instead of ln(N/df)
    #[arg(long, default_value_t = false)]
    smoothed_idf: bool,
    /// Workspace root (defaults to $MEMSEARCH_WORKSPACE, then the current directory)
    #[arg(long)]
    workspace: Option<PathBuf>,
    /// Free-text query
    #[arg(required = true)]
    query: Vec<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let layout = CorpusLayout::resolve(args.workspace);
    let query = args.query.join(" ");
    let opts = TfIdfOptions {
        max_results: args.limit,
        idf: if args.smoothed_idf { Idf::Smoothed } else { Idf::Raw },
        ..TfIdfOptions::default()
    };

    let hits = search(&layout, &query, &opts);
    tracing::debug!(query = %query, hits = hits.len(), "tf-idf search complete");

    println!("{}", render(&query, &hits, args.json)?);
    Ok(())
}

fn render(query: &str, hits: &[PassageHit], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(hits)?);
    }
    Ok(render_text(query, hits))
}

fn render_text(query: &str, hits: &[PassageHit]) -> String {
    if hits.is_empty() {
        return "no results".to_string();
    }
    let mut out = format!("\n{} results for \"{}\":\n", hits.len(), query);
    for hit in hits {
        let chunk = &hit.chunk;
        let heading = if chunk.heading.is_empty() { "(top)" } else { chunk.heading.as_str() };
        let preview = chunk.text.split('\n').take(3).collect::<Vec<_>>().join("\n  ");
        let mut matched = hit.matched_terms.clone();
        matched.extend(hit.partial_terms.iter().map(|t| format!("~{t}")));
        out.push_str(&format!("\n[{:.3}] {} → {}\n", hit.score, chunk.file, heading));
        out.push_str(&format!("  lines {}-{}\n", chunk.start_line, chunk.end_line));
        out.push_str(&format!("  {}\n", preview));
        out.push_str(&format!("  matched: {}\n", matched.join(", ")));
    }
    out
}
