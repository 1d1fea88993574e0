use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spliceforest::forest::SequenceForest;
use spliceforest::models::{Exon, Transcript, Transcripts};

/// Many transcripts sharing long prefixes with scattered divergence
fn synthetic_transcripts(count: u32, exons_per_transcript: u32) -> Transcripts {
    let mut transcripts = Transcripts::with_capacity(count as usize);
    for t in 0..count {
        let mut tx = Transcript::new(format!("tx{}", t), "Bench-Gene".to_string());
        for e in 0..exons_per_transcript {
            // transcripts diverge after two thirds of their exons
            let start = if e * 3 < exons_per_transcript * 2 {
                e * 100
            } else {
                e * 100 + (t % 7) * 10
            };
            tx.push_exon(Exon::new(start, start + 50));
        }
        transcripts.push(tx);
    }
    transcripts
}

fn build_forest(transcripts: &Transcripts) {
    let forest = SequenceForest::from_transcripts(transcripts);
    assert!(!forest.trees.is_empty());
}

fn forest_bench(c: &mut Criterion) {
    c.bench_function("build forest from 500 transcripts", |b| {
        let transcripts = synthetic_transcripts(500, 30);
        b.iter(|| build_forest(black_box(&transcripts)))
    });
}

criterion_group!(forest, forest_bench,);
criterion_main!(forest);
