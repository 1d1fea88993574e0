use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Exon;

/// One transcript: an ordered sequence of [`Exon`]s
///
/// The exon order is preserved exactly as provided by the annotation
/// source and is assumed to reflect transcription order. The
/// transcript name is an opaque identifier and is never interpreted.
///
/// # Examples
///
/// ```rust
/// use spliceforest::models::{Exon, Transcript};
///
/// let mut tx = Transcript::new("ENST00000456328.2", "DDX11L1");
/// tx.push_exon(Exon::new(11869, 12227));
/// tx.push_exon(Exon::new(12613, 12721));
/// assert_eq!(tx.exon_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    name: String,
    gene: String,
    exons: Vec<Exon>,
}

impl Transcript {
    /// Creates a new, exon-less `Transcript`
    pub fn new<S: Into<String>>(name: S, gene: S) -> Self {
        Transcript {
            name: name.into(),
            gene: gene.into(),
            exons: Vec::new(),
        }
    }

    /// Returns the transcript name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the gene the transcript belongs to
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Returns all exons in transcription order
    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    /// Appends one exon to the end of the transcript
    pub fn push_exon(&mut self, exon: Exon) {
        self.exons.push(exon)
    }

    /// Moves all exons of `exons` to the end of the transcript
    pub fn append_exons(&mut self, exons: &mut Vec<Exon>) {
        self.exons.append(exons)
    }

    /// Returns the number of exons
    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}]",
            self.name,
            self.gene,
            self.exons
                .iter()
                .map(|ex| ex.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

/// Container of [`Transcript`]s with lookup by transcript name
///
/// Iteration yields the transcripts in insertion order, so that
/// repeated runs over the same input behave identically.
///
/// # Examples
///
/// ```rust
/// use spliceforest::models::{Transcript, Transcripts};
///
/// let mut transcripts = Transcripts::new();
/// transcripts.push(Transcript::new("tx1", "Gene-A"));
/// assert_eq!(transcripts.len(), 1);
/// assert!(transcripts.by_name("tx1").is_some());
/// assert!(transcripts.by_name("tx2").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Transcripts {
    list: Vec<Transcript>,
    name_to_pos: HashMap<String, usize>,
}

impl Transcripts {
    /// Creates a new, empty container
    pub fn new() -> Self {
        Transcripts {
            list: Vec::new(),
            name_to_pos: HashMap::new(),
        }
    }

    /// Creates a new container that can hold `capacity` transcripts
    /// without re-allocating
    pub fn with_capacity(capacity: usize) -> Self {
        Transcripts {
            list: Vec::with_capacity(capacity),
            name_to_pos: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of transcripts
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the container holds no transcripts
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Adds a transcript to the end of the container
    ///
    /// A transcript with the same name as an already present one
    /// replaces the earlier entry.
    pub fn push(&mut self, transcript: Transcript) {
        match self.name_to_pos.get(transcript.name()) {
            Some(&pos) => self.list[pos] = transcript,
            None => {
                self.name_to_pos
                    .insert(transcript.name().to_string(), self.list.len());
                self.list.push(transcript);
            }
        }
    }

    /// Returns the transcript with the given name
    pub fn by_name(&self, name: &str) -> Option<&Transcript> {
        self.name_to_pos.get(name).map(|&pos| &self.list[pos])
    }

    /// Returns a mutable reference to the transcript with the given name
    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Transcript> {
        match self.name_to_pos.get(name) {
            Some(&pos) => Some(&mut self.list[pos]),
            None => None,
        }
    }

    /// Iterates all transcripts in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Transcript> {
        self.list.iter()
    }
}

impl<'a> IntoIterator for &'a Transcripts {
    type Item = &'a Transcript;
    type IntoIter = std::slice::Iter<'a, Transcript>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(name: &str) -> Transcript {
        let mut tx = Transcript::new(name, "Test-Gene");
        tx.push_exon(Exon::new(10, 20));
        tx
    }

    #[test]
    fn test_push_and_lookup() {
        let mut transcripts = Transcripts::new();
        transcripts.push(transcript("tx1"));
        transcripts.push(transcript("tx2"));

        assert_eq!(transcripts.len(), 2);
        assert_eq!(transcripts.by_name("tx2").unwrap().name(), "tx2");
    }

    #[test]
    fn test_push_replaces_same_name() {
        let mut transcripts = Transcripts::new();
        transcripts.push(transcript("tx1"));

        let mut other = Transcript::new("tx1", "Test-Gene");
        other.push_exon(Exon::new(30, 40));
        transcripts.push(other);

        assert_eq!(transcripts.len(), 1);
        assert_eq!(
            transcripts.by_name("tx1").unwrap().exons(),
            &[Exon::new(30, 40)]
        );
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut transcripts = Transcripts::new();
        for name in ["b", "a", "c"] {
            transcripts.push(transcript(name));
        }
        let names: Vec<&str> = transcripts.iter().map(|tx| tx.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
