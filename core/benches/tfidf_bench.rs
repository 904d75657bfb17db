use criterion::{criterion_group, criterion_main, Criterion};
use memsearch_core::chunk::{chunk_markdown, Chunk};
use memsearch_core::tfidf::{rank_chunks, TfIdfOptions};

fn corpus() -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for day in 1..=28 {
        let doc = format!(
            "# 2026-02-{day:02}\nmorning review\n## work\n- webhook retries with backoff round {day}\n\
             - dashboard page tweaks\n## lessons\n- learned that deploys need a rollback plan\n"
        );
        chunks.extend(chunk_markdown(&doc, &format!("memory/2026-02-{day:02}.md")));
    }
    chunks
}

fn bench_rank(c: &mut Criterion) {
    let chunks = corpus();
    let opts = TfIdfOptions::default();
    c.bench_function("rank_chunks", |b| b.iter(|| rank_chunks(chunks.clone(), "webhook backoff deploy", &opts)));
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
