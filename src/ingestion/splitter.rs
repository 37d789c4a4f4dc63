//! Sentence-count bounded chunk splitting with overlap

use crate::config::ChunkingConfig;
use crate::types::{Chunk, RawRecord};

use super::sentence::{count_sentences, split_sentence_units};

/// Splits records into chunks bounded by a sentence-count budget
///
/// Text is partitioned along the configured separator, each span further
/// segmented at sentence boundaries; a span with no internal boundary is
/// atomic and never fragmented. Units are accumulated greedily until the
/// sentence count reaches `chunk_size`, and each following chunk restarts
/// `overlap` sentence units back from the previous chunk's end.
pub struct ChunkSplitter {
    chunk_size: usize,
    overlap: usize,
    separator: String,
}

impl ChunkSplitter {
    /// Create a new splitter
    ///
    /// Callers must have validated `overlap < chunk_size` beforehand
    /// (see [`ChunkingConfig::validate`]).
    pub fn new(chunk_size: usize, overlap: usize, separator: impl Into<String>) -> Self {
        Self {
            chunk_size,
            overlap,
            separator: separator.into(),
        }
    }

    /// Create a splitter from chunking configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.overlap, config.separator.clone())
    }

    /// Split records into chunks, flattened across records
    ///
    /// `sequence_index` restarts at 0 for each source record.
    pub fn split(&self, records: &[RawRecord]) -> Vec<Chunk> {
        records
            .iter()
            .flat_map(|record| self.split_record(record))
            .collect()
    }

    /// Candidate units for one text: separator spans segmented at sentence
    /// boundaries, with each separator occurrence kept attached to the unit
    /// that precedes it so concatenation stays lossless.
    fn units(&self, text: &str) -> Vec<String> {
        let mut units: Vec<String> = Vec::new();
        let mut pieces = text.split(self.separator.as_str()).peekable();

        while let Some(piece) = pieces.next() {
            let mut segments: Vec<String> = split_sentence_units(piece)
                .into_iter()
                .map(|unit| unit.to_string())
                .collect();
            if pieces.peek().is_some() {
                match segments.last_mut() {
                    Some(last) => last.push_str(&self.separator),
                    None => {
                        // blank piece: the separator rides on the previous unit
                        if let Some(prev) = units.last_mut() {
                            prev.push_str(&self.separator);
                        }
                    }
                }
            }
            units.extend(segments);
        }
        units
    }

    fn split_record(&self, record: &RawRecord) -> Vec<Chunk> {
        let units = self.units(&record.text);
        if units.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut sequence_index = 0;

        while start < units.len() {
            let mut end = start;
            let mut candidate = String::new();
            while end < units.len() {
                candidate.push_str(&units[end]);
                end += 1;
                if count_sentences(&candidate) >= self.chunk_size {
                    break;
                }
            }

            let text = candidate.trim().to_string();
            let sentence_count = count_sentences(&text);
            chunks.push(Chunk::new(
                record.source_path.clone(),
                sequence_index,
                text,
                sentence_count,
                record.metadata.clone(),
            ));
            sequence_index += 1;

            if end >= units.len() {
                break;
            }

            // walk back `overlap` sentence units from the emitted end; the
            // overlap is measured by sentence count, not by raw unit count
            let mut next = end;
            let mut carried = 0;
            while next > start && carried < self.overlap {
                next -= 1;
                carried += count_sentences(&units[next]).max(1);
            }
            start = next.max(start + 1);
        }

        chunks
    }
}
