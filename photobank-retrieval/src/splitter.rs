use std::collections::HashMap;

use photobank_core::{Document, DocumentChunk, Value};

use crate::SplitterConfigError;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Fixed-window splitter measured in characters.
///
/// Consecutive chunks share exactly `overlap` characters, so dropping that
/// prefix from every chunk after the first and concatenating the rest gives
/// back the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl TextSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, SplitterConfigError> {
        if chunk_size == 0 {
            return Err(SplitterConfigError::ChunkSizeMustBeGreaterThanZero);
        }
        if overlap >= chunk_size {
            return Err(SplitterConfigError::OverlapTooLarge {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn split_text<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // Byte offset of every char boundary, including the end of the text.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;
        let step = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0usize;
        while start < char_count {
            let end = usize::min(start + self.chunk_size, char_count);
            chunks.push(&text[boundaries[start]..boundaries[end]]);

            if end == char_count {
                break;
            }
            start += step;
        }
        chunks
    }

    pub fn split(&self, text: &str) -> Vec<DocumentChunk> {
        self.split_text(text)
            .into_iter()
            .enumerate()
            .map(|(index, content)| DocumentChunk::new(content, index))
            .collect()
    }

    /// Splits a loaded document, copying its metadata onto every chunk.
    pub fn split_document(&self, document: &Document) -> Vec<DocumentChunk> {
        self.split_text(&document.content)
            .into_iter()
            .enumerate()
            .map(|(index, content)| {
                let mut metadata: HashMap<String, Value> = document.metadata.clone();
                metadata.insert("chunk_index".to_string(), Value::from(index));
                metadata.insert("document_id".to_string(), Value::String(document.id.clone()));
                DocumentChunk {
                    content: content.to_string(),
                    sequence_index: index,
                    metadata,
                }
            })
            .collect()
    }
}
