use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::models::{Exon, Transcript, TranscriptRead, Transcripts};
use crate::utils::errors::ReadWriteError;

/// Reads [`Transcripts`] from a GTF annotation
///
/// # Examples
///
/// ```rust
/// use spliceforest::gtf::Reader;
/// use spliceforest::models::TranscriptRead;
///
/// let mut reader = Reader::from_file("tests/data/example.gtf").unwrap();
/// reader.gene("DDX11L1");
///
/// let transcripts = reader.transcripts().unwrap();
/// assert_eq!(transcripts.len(), 2);
/// assert_eq!(
///     transcripts.by_name("ENST00000456328.2").unwrap().exon_count(),
///     3
/// );
/// ```
pub struct Reader<R> {
    inner: BufReader<R>,
    gene: Option<String>,
}

impl Reader<File> {
    /// Creates a Reader from a GTF file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        match File::open(path.as_ref()) {
            Ok(file) => Ok(Self::new(file)),
            Err(err) => Err(ReadWriteError::new(err)),
        }
    }
}

impl<R: std::io::Read> Reader<R> {
    /// Creates a new generic Reader for any `std::io::Read` object
    ///
    /// Use this method when you want to read from stdin or
    /// a remote source, e.g. via HTTP
    pub fn new(reader: R) -> Self {
        Reader {
            inner: BufReader::new(reader),
            gene: None,
        }
    }

    /// Creates a new Reader with the given buffer capacity
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Reader {
            inner: BufReader::with_capacity(capacity, reader),
            gene: None,
        }
    }

    /// Restricts the Reader to records of one gene
    ///
    /// Records whose `gene_name` attribute differs are skipped.
    /// Without a filter, every exon record of the file is kept.
    pub fn gene(&mut self, name: &str) {
        self.gene = Some(name.to_string())
    }
}

impl<R: std::io::Read> TranscriptRead for Reader<R> {
    /// Reads all (matching) exon records and groups them into transcripts
    ///
    /// Transcripts appear in the order their first exon appears in
    /// the file; exons within a transcript keep file order as well.
    fn transcripts(&mut self) -> Result<Transcripts, ReadWriteError> {
        let mut transcripts = Transcripts::new();
        let mut line = String::new();
        loop {
            line.clear();
            if self.inner.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim_end_matches(['\n', '\r']);
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if let Some(record) = parse_exon_line(trimmed)? {
                if let Some(gene) = &self.gene {
                    if record.gene_name != *gene {
                        continue;
                    }
                }
                match transcripts.by_name_mut(&record.transcript_id) {
                    Some(tx) => tx.push_exon(record.exon),
                    None => {
                        let mut tx = Transcript::new(record.transcript_id, record.gene_name);
                        tx.push_exon(record.exon);
                        transcripts.push(tx);
                    }
                }
            }
        }
        debug!("read {} transcripts from GTF input", transcripts.len());
        Ok(transcripts)
    }
}

/// One exon record of a GTF file, reduced to the fields we care about
struct ExonRecord {
    gene_name: String,
    transcript_id: String,
    exon: Exon,
}

/// Parses one GTF line, returning `None` for non-exon features
fn parse_exon_line(line: &str) -> Result<Option<ExonRecord>, ReadWriteError> {
    let cols: Vec<&str> = line.splitn(9, '\t').collect();
    if cols.len() < 9 {
        return Err(ReadWriteError::from_line("expected 9 columns", line));
    }
    if cols[2] != "exon" {
        return Ok(None);
    }

    let start: u32 = cols[3]
        .parse()
        .map_err(|_| ReadWriteError::from_line("invalid start coordinate", line))?;
    let end: u32 = cols[4]
        .parse()
        .map_err(|_| ReadWriteError::from_line("invalid end coordinate", line))?;

    let mut gene_name = String::new();
    let mut transcript_id = String::new();
    for (key, value) in attributes(cols[8]) {
        match key {
            "gene_name" => gene_name = value.to_string(),
            "transcript_id" => transcript_id = value.to_string(),
            _ => {}
        }
    }
    if transcript_id.is_empty() {
        return Err(ReadWriteError::from_line("missing transcript_id", line));
    }

    Ok(Some(ExonRecord {
        gene_name,
        transcript_id,
        exon: Exon::new(start, end),
    }))
}

/// Iterates the `key "value";` pairs of a GTF attribute column
fn attributes(column: &str) -> impl Iterator<Item = (&str, &str)> {
    column.split(';').filter_map(|part| {
        let part = part.trim();
        if part.is_empty() {
            return None;
        }
        let (key, rest) = part.split_once(char::is_whitespace)?;
        let value = rest
            .trim()
            .trim_start_matches('"')
            .trim_end_matches('"');
        if value.is_empty() {
            None
        } else {
            Some((key, value))
        }
    })
}
