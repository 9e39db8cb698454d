//! Fixed-size, overlapping, character-based chunking.
//!
//! Chunk `i + 1` starts `size - overlap` characters after chunk `i`; the walk
//! stops once a chunk reaches the end of the text, so the last chunk may be
//! shorter. Offsets are character offsets, never byte offsets, so multi-byte
//! text is never split inside a code point.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::rag_base_error::RagBaseError;

/// Chunk length and overlap, both in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub size: usize,
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: 500,
            overlap: 50,
        }
    }
}

impl ChunkConfig {
    /// # Errors
    /// [`RagBaseError::InvalidChunkConfig`] if `size == 0` or `overlap >= size`.
    pub fn validate(&self) -> Result<(), RagBaseError> {
        if self.size == 0 || self.overlap >= self.size {
            return Err(RagBaseError::InvalidChunkConfig {
                size: self.size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }

    /// Distance between the starts of consecutive chunks.
    pub fn step(&self) -> usize {
        self.size - self.overlap
    }
}

/// A bounded substring of the document; `start..end` are character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Split `text` into overlapping chunks. Empty text yields no chunks.
pub fn chunk_text(text: &str, cfg: &ChunkConfig) -> Result<Vec<Chunk>, RagBaseError> {
    cfg.validate()?;

    // Byte offset of every char boundary, plus the end of the string.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .collect();
    let n = bounds.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < n {
        let end = (start + cfg.size).min(n);
        chunks.push(Chunk {
            index: chunks.len(),
            start,
            end,
            text: text[bounds[start]..bounds[end]].to_string(),
        });
        if end == n {
            break;
        }
        start += cfg.step();
    }

    debug!(chars = n, chunks = chunks.len(), size = cfg.size, overlap = cfg.overlap, "chunked text");
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(size: usize, overlap: usize) -> ChunkConfig {
        ChunkConfig { size, overlap }
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("", &ChunkConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let out = chunk_text("The term is 12 months.", &ChunkConfig::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (0, 22));
    }

    #[test]
    fn count_matches_formula_and_every_char_is_covered() {
        let text: String = (0..1234).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let c = cfg(500, 50);
        let out = chunk_text(&text, &c).unwrap();

        // ceil((L - overlap) / (size - overlap)) for L > size
        let expected = (text.len() - c.overlap).div_ceil(c.step());
        assert_eq!(out.len(), expected);

        let mut covered = vec![false; text.len()];
        for ch in &out {
            for slot in &mut covered[ch.start..ch.end] {
                *slot = true;
            }
        }
        assert!(covered.iter().all(|c| *c));
        assert_eq!(out.last().unwrap().end, text.len());
    }

    #[test]
    fn consecutive_chunks_overlap_exactly() {
        let text = "x".repeat(95);
        let out = chunk_text(&text, &cfg(30, 5)).unwrap();
        for pair in out.windows(2) {
            assert_eq!(pair[0].end - pair[1].start, 5);
            let tail: String = pair[0].text.chars().skip(25).collect();
            let head: String = pair[1].text.chars().take(5).collect();
            assert_eq!(tail, head);
        }
        assert_eq!(out.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn offsets_are_characters_not_bytes() {
        let text = "Договор действует двенадцать месяцев";
        let out = chunk_text(text, &cfg(10, 2)).unwrap();
        assert_eq!(out[0].text.chars().count(), 10);
        assert_eq!(out[1].start, 8);
        let rebuilt: String = out
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let skip = if i == 0 { 0 } else { 2 };
                c.text.chars().skip(skip).collect::<String>()
            })
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        assert!(matches!(
            chunk_text("abc", &cfg(50, 50)),
            Err(RagBaseError::InvalidChunkConfig { size: 50, overlap: 50 })
        ));
        assert!(chunk_text("abc", &cfg(0, 0)).is_err());
    }
}
