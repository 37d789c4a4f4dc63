//! Document ingestion: format readers, sentence sizing, chunk splitting

pub mod reader;
pub mod sentence;
pub mod splitter;

pub use reader::{resolve_reader, DocumentReader};
pub use sentence::{count_sentences, split_sentence_units};
pub use splitter::ChunkSplitter;
