//! Sentence segmentation.
//!
//! [`SentenceSegmenter`] is the seam the HTTP layer depends on;
//! [`GermanSegmenter`] is the rule-based implementation shipped with the
//! service.

mod german;

pub use german::GermanSegmenter;

pub trait SentenceSegmenter: Send + Sync {
    /// Splits `text` into sentences in input order.
    ///
    /// Sentences are trimmed and never empty. Joining them reproduces the
    /// input up to whitespace at sentence boundaries.
    fn segment(&self, text: &str) -> Vec<String>;
}
