use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::forest::SequenceForest;
use crate::models::{Exon, ForestWrite, TranscriptWrite, Transcripts};
use crate::utils::errors::{ForestError, ReadWriteError};

const EXON_HEIGHT: f64 = 20.0;
const EXON_COLOR: &str = "goldenrod";
const LABEL_COLOR: &str = "darkslategray";
const CONNECTOR_COLOR: &str = "tan";
const LINE_COLORS: [&str; 3] = ["indigo", "forestgreen", "navy"];

// forest diagrams ignore genomic distances, every exon gets the
// same width and spacing
const EXON_WIDTH: f64 = 100.0;
const EXON_GAP: f64 = 100.0;
const LEFT_MARGIN: f64 = 60.0;
const RIGHT_MARGIN: f64 = 60.0;
const CONNECTOR_STEP: f64 = 5.0;
const ROW_GAP: f64 = 20.0;

// transcript diagrams are drawn to scale onto a fixed-width canvas
const SCALED_WIDTH: f64 = 1000.0;
const SCALED_MARGIN: f64 = 50.0;
const ROW_HEIGHT: f64 = 40.0;

/// Writes [`Transcripts`] or a [`SequenceForest`] as an SVG diagram
///
/// # Examples
///
/// ```rust
/// use spliceforest::forest::SequenceForest;
/// use spliceforest::models::ForestWrite;
/// use spliceforest::svg::Writer;
/// use spliceforest::tests::transcripts::standard_transcripts;
///
/// let forest = SequenceForest::from_transcripts(&standard_transcripts());
///
/// let output = Vec::new(); // substitute this with proper IO (io::stdout())
/// let mut writer = Writer::new(output);
/// writer.exon_labels(true);
/// writer.write_forest(&forest).unwrap();
///
/// let svg = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert!(svg.starts_with("<?xml"));
/// assert!(svg.contains("<rect"));
/// ```
pub struct Writer<W: std::io::Write> {
    inner: BufWriter<W>,
    exon_labels: bool,
    merge_common_sequences: bool,
    title: Option<String>,
}

impl Writer<File> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        match File::create(path.as_ref()) {
            Ok(file) => Ok(Self::new(file)),
            Err(err) => Err(ReadWriteError::new(err)),
        }
    }
}

impl<W: std::io::Write> Writer<W> {
    /// Creates a new generic Writer for any `std::io::Write` object
    ///
    /// Use this method when you want to write to stdout or
    /// a remote target, e.g. via HTTP
    pub fn new(writer: W) -> Self {
        Writer {
            inner: BufWriter::new(writer),
            exon_labels: false,
            merge_common_sequences: false,
            title: None,
        }
    }

    /// Labels the exons of a forest diagram `e1`, `e2`, ...
    ///
    /// Labels are assigned in ascending exon order on first
    /// encounter and are stable across the trees of one diagram.
    pub fn exon_labels(&mut self, on: bool) {
        self.exon_labels = on
    }

    /// Draws every shared exon-to-exon connection only once per tree
    ///
    /// Without merging, each sequence draws its complete polyline,
    /// which restates the shared prefix of every sibling sequence.
    pub fn merge_common_sequences(&mut self, on: bool) {
        self.merge_common_sequences = on
    }

    /// Adds a title line above the diagram
    pub fn title(&mut self, title: &str) {
        self.title = Some(title.to_string())
    }

    pub fn flush(&mut self) -> Result<(), ForestError> {
        match self.inner.flush() {
            Ok(res) => Ok(res),
            Err(err) => Err(ForestError::from(err.to_string())),
        }
    }

    pub fn into_inner(self) -> Result<W, ForestError> {
        match self.inner.into_inner() {
            Ok(res) => Ok(res),
            Err(err) => Err(ForestError::from(err.to_string())),
        }
    }

    fn write_document(&mut self, width: f64, height: f64, body: &str) -> Result<(), std::io::Error> {
        writeln!(self.inner, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(
            self.inner,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {:.1} {:.1}\">",
            width, height
        )?;
        self.inner.write_all(body.as_bytes())?;
        writeln!(self.inner, "</svg>")
    }
}

impl<W: std::io::Write> TranscriptWrite for Writer<W> {
    /// Writes one row per transcript, exons to scale
    fn write_transcripts(&mut self, transcripts: &Transcripts) -> Result<(), std::io::Error> {
        let mut xmin = u32::MAX;
        let mut xmax = 0u32;
        for tx in transcripts {
            for exon in tx.exons() {
                xmin = xmin.min(exon.start());
                xmax = xmax.max(exon.end());
            }
        }
        if xmin > xmax {
            // no exons at all
            xmin = 0;
            xmax = 1;
        }
        let span = (xmax.saturating_sub(xmin)).max(1) as f64;
        let scale = SCALED_WIDTH / span;
        let sx = move |x: u32| SCALED_MARGIN + (x as f64 - xmin as f64) * scale;

        let top = match &self.title {
            Some(_) => 50.0,
            None => 20.0,
        };
        let width = SCALED_WIDTH + 2.0 * SCALED_MARGIN;
        let height = top + transcripts.len() as f64 * ROW_HEIGHT + 10.0;

        let mut body = String::new();
        if let Some(title) = &self.title {
            body.push_str(&text(width / 2.0, 25.0, title, LABEL_COLOR, 18.0, true));
        }
        for (row, tx) in transcripts.iter().enumerate() {
            let ty = top + row as f64 * ROW_HEIGHT;
            for exon in tx.exons() {
                body.push_str(&rect(
                    sx(exon.start()),
                    ty,
                    exon.end().saturating_sub(exon.start()) as f64 * scale,
                    EXON_HEIGHT,
                    EXON_COLOR,
                    Some(0.3),
                ));
            }
            for pair in tx.exons().windows(2) {
                let x1 = sx(pair[0].end());
                let x2 = sx(pair[1].start());
                body.push_str(&polyline(
                    &[
                        (x1, ty),
                        ((x1 + x2) / 2.0, ty - CONNECTOR_STEP),
                        (x2, ty),
                    ],
                    CONNECTOR_COLOR,
                ));
            }
        }
        self.write_document(width, height, &body)
    }
}

impl<W: std::io::Write> ForestWrite for Writer<W> {
    /// Writes one row per decision tree, exons unscaled
    fn write_forest(&mut self, forest: &SequenceForest) -> Result<(), std::io::Error> {
        let mut body = String::new();
        let mut labels: HashMap<Exon, String> = HashMap::new();
        let top = match &self.title {
            Some(_) => 40.0,
            None => 10.0,
        };
        let mut y = top;
        let mut max_x = LEFT_MARGIN + EXON_WIDTH;

        for (index, tree) in forest.trees.iter().enumerate() {
            // every exon occurring anywhere in this tree, drawn once
            let exons: BTreeSet<Exon> = tree.iter().flatten().copied().collect();
            let mut layout: HashMap<Exon, (f64, f64)> = HashMap::new();
            for (i, &exon) in exons.iter().enumerate() {
                let x = LEFT_MARGIN + i as f64 * (EXON_WIDTH + EXON_GAP);
                layout.insert(exon, (x, x + EXON_WIDTH));
                max_x = max_x.max(x + EXON_WIDTH);
            }

            let headroom = CONNECTOR_STEP * (tree.len() + 1) as f64;
            let ty = y + headroom;

            body.push_str(&text(
                5.0,
                ty + 15.0,
                &format!("d{}", index + 1),
                LABEL_COLOR,
                14.0,
                false,
            ));
            for &exon in &exons {
                let (x, _) = layout[&exon];
                body.push_str(&rect(x, ty, EXON_WIDTH, EXON_HEIGHT, EXON_COLOR, None));
                if self.exon_labels {
                    let next = format!("e{}", labels.len() + 1);
                    let label = labels.entry(exon).or_insert(next);
                    body.push_str(&text(x + 8.0, ty + 15.0, label, LABEL_COLOR, 14.0, true));
                }
            }

            let mut drawn: HashSet<(Exon, Exon)> = HashSet::new();
            for (seq_index, sequence) in tree.iter().enumerate() {
                let height = CONNECTOR_STEP * (seq_index + 1) as f64;
                let color = LINE_COLORS[seq_index % LINE_COLORS.len()];
                for pair in sequence.windows(2) {
                    if self.merge_common_sequences && !drawn.insert((pair[0], pair[1])) {
                        continue;
                    }
                    let x1 = layout[&pair[0]].1;
                    let x2 = layout[&pair[1]].0;
                    let xm = (x1 + x2) / 2.0;
                    // connectors alternate between the middle, the top
                    // and the bottom of the exon row
                    let ys = match seq_index % 3 {
                        0 => [
                            ty + EXON_HEIGHT / 2.0,
                            ty + EXON_HEIGHT / 2.0,
                            ty + EXON_HEIGHT / 2.0,
                        ],
                        1 => [ty, ty - height, ty],
                        _ => [
                            ty + EXON_HEIGHT,
                            ty + EXON_HEIGHT + height,
                            ty + EXON_HEIGHT,
                        ],
                    };
                    body.push_str(&polyline(
                        &[(x1, ys[0]), (xm, ys[1]), (x2, ys[2])],
                        color,
                    ));
                }
            }

            y = ty + EXON_HEIGHT + headroom + ROW_GAP;
        }

        let width = max_x + RIGHT_MARGIN;
        if let Some(title) = &self.title {
            body.push_str(&text(width / 2.0, 25.0, title, LABEL_COLOR, 18.0, true));
        }
        self.write_document(width, y, &body)
    }
}

fn rect(x: f64, y: f64, width: f64, height: f64, color: &str, opacity: Option<f64>) -> String {
    let opacity = match opacity {
        Some(o) => format!(" fill-opacity=\"{}\"", o),
        None => String::new(),
    };
    format!(
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"{}/>\n",
        x, y, width, height, color, opacity
    )
}

fn polyline(points: &[(f64, f64)], color: &str) -> String {
    let points = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<String>>()
        .join(" ");
    format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
        points, color
    )
}

fn text(x: f64, y: f64, content: &str, color: &str, size: f64, bold: bool) -> String {
    let weight = if bold { " font-weight=\"bold\"" } else { "" };
    format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"{:.0}\"{}>{}</text>\n",
        x,
        y,
        color,
        size,
        weight,
        escape(content)
    )
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::transcripts::{divergent_trio, standard_transcripts};

    fn render_forest(setup: impl Fn(&mut Writer<Vec<u8>>)) -> String {
        let forest = SequenceForest::from_transcripts(&divergent_trio());
        let mut writer = Writer::new(Vec::new());
        setup(&mut writer);
        writer.write_forest(&forest).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_forest_diagram_draws_each_exon_once_per_tree() {
        let svg = render_forest(|_| {});
        // divergent_trio: one tree over 6 distinct exons
        assert_eq!(svg.matches("<rect").count(), 6);
        assert!(svg.contains("viewBox"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_forest_labels_are_optional() {
        let plain = render_forest(|_| {});
        // only the d1 row label
        assert_eq!(plain.matches("<text").count(), 1);

        let labeled = render_forest(|w| w.exon_labels(true));
        assert_eq!(labeled.matches("<text").count(), 7);
        assert!(labeled.contains(">e1<"));
        assert!(labeled.contains(">e6<"));
    }

    #[test]
    fn test_merging_drops_repeated_connections() {
        // three sequences of lengths 4, 4 and 3 -> 8 connections,
        // 3 of them restate the shared prefix
        let full = render_forest(|_| {});
        assert_eq!(full.matches("<polyline").count(), 8);

        let merged = render_forest(|w| w.merge_common_sequences(true));
        assert_eq!(merged.matches("<polyline").count(), 5);
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = render_forest(|w| w.title("exons & <trees>"));
        assert!(svg.contains("exons &amp; &lt;trees&gt;"));
    }

    #[test]
    fn test_transcript_diagram() {
        let transcripts = standard_transcripts();
        let mut writer = Writer::new(Vec::new());
        writer.write_transcripts(&transcripts).unwrap();
        let svg = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        // 4 exons per transcript, one connector fewer per row
        assert_eq!(svg.matches("<rect").count(), 8);
        assert_eq!(svg.matches("<polyline").count(), 6);
    }

    #[test]
    fn test_empty_forest_produces_a_valid_document() {
        let forest = SequenceForest::default();
        let mut writer = Writer::new(Vec::new());
        writer.write_forest(&forest).unwrap();
        let svg = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert!(svg.starts_with("<?xml"));
        assert!(!svg.contains("<rect"));
    }
}
