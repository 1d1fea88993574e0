//! Reconstruct splicing decision forests from transcripts
//!
//! Many transcripts of the same gene often share an identical leading
//! sequence of exons before they diverge into distinct continuations.
//! This module merges the flat per-transcript exon lists into a
//! prefix tree ([`ExonTrie`]) and enumerates every maximal divergent
//! path, yielding a [`SequenceForest`]:
//!
//! ```text
//! Transcript 1   AAAA---BBBB---CCCC---DDDD
//! Transcript 2   AAAA---BBBB---CCCC-------------EEEE
//! Transcript 3   AAAA---BBBB---CCCC---DDDD
//!
//! Tree for AAAA  AAAA---BBBB---CCCC---+--DDDD
//!                                     +--------------EEEE
//! ```
//!
//! Transcript identity does not survive the merge: transcripts 1 and 3
//! above contribute a single path. Only structural branching is kept.
//!
//! # Examples
//!
//! ```rust
//! use spliceforest::forest::SequenceForest;
//! use spliceforest::tests::transcripts::standard_transcripts;
//!
//! let transcripts = standard_transcripts();
//! let forest = SequenceForest::from_transcripts(&transcripts);
//!
//! assert_eq!(forest.trees.len(), 1);
//! assert_eq!(forest.trees[0].len(), 2);
//! assert_eq!(forest.exons.len(), 5);
//! ```

mod trie;

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::models::{Exon, Transcripts};

pub use trie::{ExonTrie, NodeId};

/// One maximal root-to-leaf path through a decision tree,
/// in transcription order
pub type ExonSequence = Vec<Exon>;

/// All maximal paths sharing the same starting exon
pub type SequenceTree = Vec<ExonSequence>;

/// The complete result of the forest reconstruction
///
/// - `exons` is the ascending sorted list of every distinct exon seen
///   in any input transcript.
/// - `trees` holds one [`SequenceTree`] per distinct starting exon,
///   ascending by that exon. Within a tree, sequences are ordered by
///   the exon values at each branch, so the output is independent of
///   the order in which transcripts were supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SequenceForest {
    pub exons: Vec<Exon>,
    pub trees: Vec<SequenceTree>,
}

impl SequenceForest {
    /// Builds the forest for a batch of transcripts
    ///
    /// Every transcript's exon sequence is inserted into a fresh
    /// [`ExonTrie`] and the finished trie is enumerated from every
    /// root. The input map is consumed once and left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spliceforest::forest::SequenceForest;
    /// use spliceforest::models::Transcripts;
    ///
    /// let forest = SequenceForest::from_transcripts(&Transcripts::new());
    /// assert!(forest.exons.is_empty());
    /// assert!(forest.trees.is_empty());
    /// ```
    pub fn from_transcripts(transcripts: &Transcripts) -> Self {
        let mut trie = ExonTrie::new();
        for tx in transcripts {
            trie.insert(tx.exons());
        }
        debug!(
            "merged {} transcripts into {} trie nodes",
            transcripts.len(),
            trie.node_count()
        );
        Self::from_trie(&trie)
    }

    /// Enumerates a fully built trie into a forest
    pub fn from_trie(trie: &ExonTrie) -> Self {
        let exons: Vec<Exon> = trie.exons().copied().collect();
        let trees: Vec<SequenceTree> = trie
            .roots()
            .map(|root| sequences_below(trie, root))
            .collect();
        SequenceForest { exons, trees }
    }
}

impl fmt::Display for SequenceForest {
    /// One line per sequence, trees separated by their index
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, tree) in self.trees.iter().enumerate() {
            writeln!(f, "tree {}", idx + 1)?;
            for sequence in tree {
                writeln!(
                    f,
                    "  {}",
                    sequence
                        .iter()
                        .map(|ex| ex.to_string())
                        .collect::<Vec<String>>()
                        .join(" ")
                )?;
            }
        }
        Ok(())
    }
}

/// Returns every maximal path from `node` down to a leaf,
/// including `node`'s own exon as the first element
///
/// Children are visited in ascending order of their exon value, so
/// the result is deterministic. The returned list has exactly one
/// sequence per leaf below `node`.
pub fn sequences_below(trie: &ExonTrie, node: NodeId) -> SequenceTree {
    let exon = trie.exon(node);
    if trie.is_leaf(node) {
        return vec![vec![exon]];
    }
    let mut sequences = Vec::new();
    for child in trie.children(node) {
        for mut sequence in sequences_below(trie, child) {
            sequence.insert(0, exon);
            sequences.push(sequence);
        }
    }
    sequences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transcript;

    fn exons(coords: &[(u32, u32)]) -> Vec<Exon> {
        coords.iter().map(|&c| Exon::from(c)).collect()
    }

    fn transcripts(input: &[(&str, &[(u32, u32)])]) -> Transcripts {
        let mut txs = Transcripts::new();
        for (name, coords) in input {
            let mut tx = Transcript::new(*name, "Test-Gene");
            tx.append_exons(&mut exons(coords));
            txs.push(tx);
        }
        txs
    }

    #[test]
    fn test_two_transcripts_diverging_at_the_last_exon() {
        let txs = transcripts(&[
            ("t1", &[(20, 25), (30, 35), (50, 55), (70, 75)]),
            ("t2", &[(20, 25), (30, 35), (50, 55), (80, 85)]),
        ]);
        let forest = SequenceForest::from_transcripts(&txs);

        assert_eq!(forest.trees.len(), 1);
        assert_eq!(
            forest.trees[0],
            vec![
                exons(&[(20, 25), (30, 35), (50, 55), (70, 75)]),
                exons(&[(20, 25), (30, 35), (50, 55), (80, 85)]),
            ]
        );
        assert_eq!(
            forest.exons,
            exons(&[(20, 25), (30, 35), (50, 55), (70, 75), (80, 85)])
        );
    }

    #[test]
    fn test_identical_transcripts_yield_one_sequence() {
        let txs = transcripts(&[
            ("t1", &[(20, 25), (30, 35)]),
            ("t2", &[(20, 25), (30, 35)]),
        ]);
        let forest = SequenceForest::from_transcripts(&txs);

        assert_eq!(forest.trees.len(), 1);
        assert_eq!(forest.trees[0], vec![exons(&[(20, 25), (30, 35)])]);
    }

    #[test]
    fn test_single_exon_transcript() {
        let txs = transcripts(&[("t1", &[(5, 10)])]);
        let forest = SequenceForest::from_transcripts(&txs);

        assert_eq!(forest.exons, exons(&[(5, 10)]));
        assert_eq!(forest.trees, vec![vec![exons(&[(5, 10)])]]);
    }

    #[test]
    fn test_empty_input() {
        let forest = SequenceForest::from_transcripts(&Transcripts::new());
        assert!(forest.exons.is_empty());
        assert!(forest.trees.is_empty());
    }

    #[test]
    fn test_divergence_at_different_depths() {
        let txs = transcripts(&[
            ("t1", &[(10, 15), (20, 25), (30, 35), (40, 45)]),
            ("t2", &[(10, 15), (20, 25), (30, 35), (50, 55)]),
            ("t3", &[(10, 15), (20, 25), (60, 65)]),
        ]);
        let forest = SequenceForest::from_transcripts(&txs);

        assert_eq!(forest.trees.len(), 1);
        assert_eq!(
            forest.trees[0],
            vec![
                exons(&[(10, 15), (20, 25), (30, 35), (40, 45)]),
                exons(&[(10, 15), (20, 25), (30, 35), (50, 55)]),
                exons(&[(10, 15), (20, 25), (60, 65)]),
            ]
        );
    }

    #[test]
    fn test_trees_are_ordered_by_root_exon() {
        // inserted in descending root order on purpose
        let txs = transcripts(&[
            ("t1", &[(90, 95), (100, 105)]),
            ("t2", &[(10, 15), (20, 25)]),
        ]);
        let forest = SequenceForest::from_transcripts(&txs);

        assert_eq!(forest.trees.len(), 2);
        assert_eq!(forest.trees[0][0][0], Exon::new(10, 15));
        assert_eq!(forest.trees[1][0][0], Exon::new(90, 95));
    }

    #[test]
    fn test_output_is_independent_of_insertion_order() {
        let forward = transcripts(&[
            ("t1", &[(20, 25), (30, 35), (50, 55)]),
            ("t2", &[(20, 25), (40, 45)]),
            ("t3", &[(5, 8), (20, 25)]),
        ]);
        let backward = transcripts(&[
            ("t3", &[(5, 8), (20, 25)]),
            ("t2", &[(20, 25), (40, 45)]),
            ("t1", &[(20, 25), (30, 35), (50, 55)]),
        ]);

        assert_eq!(
            SequenceForest::from_transcripts(&forward),
            SequenceForest::from_transcripts(&backward)
        );
    }

    #[test]
    fn test_every_transcript_is_a_prefix_of_some_sequence() {
        let txs = transcripts(&[
            ("t1", &[(20, 25), (30, 35)]),
            ("t2", &[(20, 25), (30, 35), (50, 55)]),
            ("t3", &[(20, 25), (40, 45)]),
        ]);
        let forest = SequenceForest::from_transcripts(&txs);

        for tx in &txs {
            let found = forest.trees.iter().flatten().any(|sequence| {
                sequence.len() >= tx.exon_count()
                    && sequence[..tx.exon_count()] == *tx.exons()
            });
            assert!(found, "no sequence starts with {}", tx);
        }
    }

    #[test]
    fn test_leaf_count_matches_sequence_count() {
        let mut trie = ExonTrie::new();
        trie.insert(&exons(&[(10, 15), (20, 25), (30, 35)]));
        trie.insert(&exons(&[(10, 15), (20, 25), (40, 45)]));
        trie.insert(&exons(&[(10, 15), (50, 55)]));

        let root = trie.roots().next().unwrap();
        let sequences = sequences_below(&trie, root);

        assert_eq!(sequences.len(), 3);
        for sequence in &sequences {
            assert_eq!(sequence[0], Exon::new(10, 15));
        }
        assert_eq!(sequences[0].len(), 3);
        assert_eq!(sequences[1].len(), 3);
        assert_eq!(sequences[2].len(), 2);
    }

    #[test]
    fn test_exons_field_is_sorted_and_unique() {
        let txs = transcripts(&[
            ("t1", &[(50, 55), (20, 25), (50, 55)]),
            ("t2", &[(20, 25), (10, 15)]),
        ]);
        let forest = SequenceForest::from_transcripts(&txs);

        assert_eq!(forest.exons, exons(&[(10, 15), (20, 25), (50, 55)]));
    }

    #[test]
    fn test_display_lists_each_sequence() {
        let txs = transcripts(&[
            ("t1", &[(20, 25), (30, 35)]),
            ("t2", &[(20, 25), (40, 45)]),
        ]);
        let forest = SequenceForest::from_transcripts(&txs);

        assert_eq!(
            forest.to_string(),
            "tree 1\n  20-25 30-35\n  20-25 40-45\n"
        );
    }
}
