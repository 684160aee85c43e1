/// Splits text into fixed-size character windows for models with a bounded input.
///
/// Windows are cut on character boundaries only; sentences may be split across
/// two chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_chunk_size: usize,
}

impl Chunker {
    pub const SEPARATOR: &'static str = " ";

    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
        }
    }

    /// Contiguous windows of at most `max_chunk_size` characters, in order.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if char_len(text) <= self.max_chunk_size {
            return vec![text];
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;
        for (idx, _) in text.char_indices() {
            if count == self.max_chunk_size {
                chunks.push(&text[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }
        chunks.push(&text[start..]);
        chunks
    }

    /// Rejoins translated chunks with a single space, preserving their order.
    pub fn join<S: AsRef<str>>(chunks: &[S]) -> String {
        chunks
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(Self::SEPARATOR)
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The longest prefix of `text` holding at most `max_chars` characters.
pub fn leading_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
