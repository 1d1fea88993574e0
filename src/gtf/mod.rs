//! Read transcripts from GTF gene-annotation files
//!
//! Only `exon` feature records are considered; all other feature
//! types (`gene`, `transcript`, `CDS`, ...) are skipped. Exons are
//! grouped by their `transcript_id` attribute, in file order, and
//! the coordinates are kept verbatim (1-based, inclusive).
//!
//! GTF files usually contain the annotation of a whole genome.
//! Since the decision forest is only meaningful within one gene, the
//! [`Reader`] can filter records by their `gene_name` attribute.

mod reader;

pub use reader::Reader;
