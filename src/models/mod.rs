//! Data models to represent exons and transcripts
//!
//! The models are deliberately small: an [`Exon`] is nothing but a
//! comparable coordinate interval and a [`Transcript`] an ordered
//! list of exons. Strand, frame and coordinate-system handling are
//! left to the annotation source.

mod exon;
mod transcript;

use crate::forest::SequenceForest;
use crate::utils::errors::ReadWriteError;

pub use exon::Exon;
pub use transcript::{Transcript, Transcripts};

/// Trait to read [`Transcripts`] from any annotation source
pub trait TranscriptRead {
    /// Consumes the reader and returns all transcripts
    fn transcripts(&mut self) -> Result<Transcripts, ReadWriteError>;
}

/// Trait to write [`Transcripts`] to an output
pub trait TranscriptWrite {
    /// Writes all transcripts to the output
    fn write_transcripts(&mut self, transcripts: &Transcripts) -> Result<(), std::io::Error>;
}

/// Trait to write a [`SequenceForest`] to an output
pub trait ForestWrite {
    /// Writes the forest to the output
    fn write_forest(&mut self, forest: &SequenceForest) -> Result<(), std::io::Error>;
}
