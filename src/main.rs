use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use spliceforest::forest::SequenceForest;
use spliceforest::gtf;
use spliceforest::models::{ForestWrite, TranscriptRead, TranscriptWrite};
use spliceforest::svg;

/// Reconstruct the splicing decision forest of a gene from a GTF annotation.
#[derive(Parser, Debug)]
#[command(name = "spliceforest")]
#[command(author, version, about)]
struct Cli {
    /// Input GTF annotation file
    #[arg(long, short)]
    gtf: PathBuf,

    /// Gene to analyze, matched against the `gene_name` attribute
    #[arg(long, short = 'n')]
    gene: String,

    /// Write a to-scale diagram of the gene's transcripts to this SVG file
    #[arg(long)]
    transcripts_svg: Option<PathBuf>,

    /// Write a diagram of the decision forest to this SVG file
    #[arg(long)]
    forest_svg: Option<PathBuf>,

    /// Label the exons of the forest diagram e1, e2, ...
    #[arg(long)]
    labels: bool,

    /// Draw each shared exon-to-exon connection only once per tree
    #[arg(long)]
    merge: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut reader = gtf::Reader::from_file(&cli.gtf)
        .with_context(|| format!("opening {}", cli.gtf.display()))?;
    reader.gene(&cli.gene);
    let transcripts = reader
        .transcripts()
        .with_context(|| format!("reading {}", cli.gtf.display()))?;
    if transcripts.is_empty() {
        anyhow::bail!("no transcripts found for gene {}", cli.gene);
    }
    eprintln!("{}: {} transcripts", cli.gene, transcripts.len());

    let forest = SequenceForest::from_transcripts(&transcripts);
    println!("{}", forest);

    if let Some(path) = &cli.transcripts_svg {
        let mut writer =
            svg::Writer::from_file(path).with_context(|| format!("creating {}", path.display()))?;
        writer.title(&cli.gene);
        writer
            .write_transcripts(&transcripts)
            .with_context(|| format!("writing {}", path.display()))?;
        writer.flush()?;
        eprintln!("Transcript diagram written to {}", path.display());
    }

    if let Some(path) = &cli.forest_svg {
        let mut writer =
            svg::Writer::from_file(path).with_context(|| format!("creating {}", path.display()))?;
        writer.title(&cli.gene);
        writer.exon_labels(cli.labels);
        writer.merge_common_sequences(cli.merge);
        writer
            .write_forest(&forest)
            .with_context(|| format!("writing {}", path.display()))?;
        writer.flush()?;
        eprintln!("Forest diagram written to {}", path.display());
    }

    Ok(())
}
