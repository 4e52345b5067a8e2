pub mod bits;
pub mod codec;
pub mod error;
pub mod file;
pub mod lz77;

pub use codec::{Decoded, Decoder, Encoded, Encoder};
pub use error::{Error, Result};
pub use file::{compress_file, decompress_file, FileReport};
pub use lz77::{Token, TokenFormat, TokenWidths};

/// Largest supported window (distance fields up to 24 bits)
pub const MAX_WINDOW_SIZE: usize = 1 << 24;

/// Largest supported lookahead buffer (length fields up to 16 bits)
pub const MAX_BUFFER_SIZE: usize = 1 << 16;

/// How the encoder searches the window for matches
///
/// Both strategies produce identical token streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Per-byte position chains over the window
    #[default]
    Indexed,
    /// Substring search of the whole window for every extension
    BruteForce,
}

/// Configuration for one compression or decompression pass
///
/// Built once and never mutated; the decoder must use the same window size,
/// buffer size and format as the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    window_size: usize,
    buffer_size: usize,
    format: TokenFormat,
    search: SearchStrategy,
    widths: TokenWidths,
}

impl CodecConfig {
    /// Validate sizes and derive field widths
    ///
    /// `window_size` must be in `1..=MAX_WINDOW_SIZE` and `buffer_size` in
    /// `2..=MAX_BUFFER_SIZE`, so a literal can always follow a match.
    pub fn new(window_size: usize, buffer_size: usize) -> Result<Self> {
        if !(1..=MAX_WINDOW_SIZE).contains(&window_size) {
            return Err(Error::InvalidWindowSize { size: window_size, max: MAX_WINDOW_SIZE });
        }
        if !(2..=MAX_BUFFER_SIZE).contains(&buffer_size) {
            return Err(Error::InvalidBufferSize { size: buffer_size, max: MAX_BUFFER_SIZE });
        }

        Ok(Self {
            window_size,
            buffer_size,
            format: TokenFormat::default(),
            search: SearchStrategy::default(),
            widths: TokenWidths::new(window_size, buffer_size),
        })
    }

    /// Same sizes with a different token format
    pub fn with_format(self, format: TokenFormat) -> Self {
        Self { format, ..self }
    }

    /// Same sizes with a different search strategy
    pub fn with_search(self, search: SearchStrategy) -> Self {
        Self { search, ..self }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn format(&self) -> TokenFormat {
        self.format
    }

    pub fn search(&self) -> SearchStrategy {
        self.search
    }

    /// Field widths derived from the window and buffer sizes
    pub fn widths(&self) -> TokenWidths {
        self.widths
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            window_size: 4096,
            buffer_size: 32,
            format: TokenFormat::default(),
            search: SearchStrategy::default(),
            widths: TokenWidths::new(4096, 32),
        }
    }
}

/// Statistics from a compression or decompression pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecStats {
    /// Size of the uncompressed data
    pub original_bytes: u64,
    /// Size of the token stream, including padding
    pub compressed_bytes: u64,
    pub tokens: u64,
    pub literal_tokens: u64,
    pub match_tokens: u64,
    /// Longest back-reference emitted or decoded
    pub longest_match: usize,
}

impl CodecStats {
    /// Fold one token into the counters
    pub fn record(&mut self, token: &Token) {
        self.tokens += 1;
        if token.is_match() {
            self.match_tokens += 1;
            self.longest_match = self.longest_match.max(token.length);
        } else {
            self.literal_tokens += 1;
        }
    }

    /// Original size divided by compressed size
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_bytes == 0 {
            return 1.0;
        }
        self.original_bytes as f64 / self.compressed_bytes as f64
    }
}
