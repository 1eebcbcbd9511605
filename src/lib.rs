pub mod config;
pub mod core;
pub mod error;

use tantivy::tokenizer::{BoxTokenStream, Token, TokenStream, Tokenizer};

pub use crate::config::configuration::{Configuration, SplitConfig, DEFAULT_CONFIG};
pub use crate::core::segmenter::{join, segment, Segmenter, Segments, Span, Spans};
pub use crate::error::{Result, SplitError};

/// Tantivy tokenizer emitting one token per separator-delimited segment.
///
/// Token positions are segment indices, so skipped empty segments still
/// leave a gap in positions.
#[derive(Clone)]
pub struct SplitTokenizer {
    segmenter: Segmenter,
    skip_empty: bool,
}

pub struct SplitTokenStream {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenStream for SplitTokenStream {
    fn advance(&mut self) -> bool {
        if self.index < self.tokens.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &Token {
        &self.tokens[self.index - 1]
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.tokens[self.index - 1]
    }
}

impl SplitTokenizer {
    pub fn new(segmenter: Segmenter, skip_empty: bool) -> Self {
        Self {
            segmenter,
            skip_empty,
        }
    }

    pub fn from_config<C: Configuration + ?Sized>(cfg: &C) -> Result<Self> {
        let segmenter = Segmenter::new(cfg.separator())?;
        Ok(Self::new(segmenter, cfg.skip_empty()))
    }
}

impl Tokenizer for SplitTokenizer {
    fn token_stream<'a>(&self, text: &'a str) -> BoxTokenStream<'a> {
        let tokens = self
            .segmenter
            .spans(text)
            .filter(|span| !(self.skip_empty && span.is_empty()))
            .map(|span| Token {
                offset_from: span.start,
                offset_to: span.end,
                position: span.index,
                text: String::from(&text[span.range()]),
                position_length: 1,
            })
            .collect();
        BoxTokenStream::from(SplitTokenStream { tokens, index: 0 })
    }
}
