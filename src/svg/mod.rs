//! Draw transcripts and decision forests as SVG diagrams
//!
//! Two diagram types are supported:
//!
//! - A transcript diagram: one row per transcript, exons drawn to
//!   scale as rectangles, consecutive exons connected by a line.
//! - A forest diagram: one row per decision tree. Exons are laid out
//!   with a fixed width and spacing (genomic distances between exons
//!   are meaningless here), and every sequence of the tree is drawn
//!   as a colored polyline hopping from exon to exon.
//!
//! ```text
//!            _____________
//!           /             \
//!  [e1]---[e2]---[e3]---[e4]
//! ```
//!
//! The output is a standalone SVG document, viewable in any browser.

mod writer;

pub use writer::Writer;
