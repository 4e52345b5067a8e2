use crate::bits::BitWriter;
use crate::error::Result;
use crate::lz77::{SlidingWindow, Token};
use crate::{CodecConfig, CodecStats};
use std::io::{Read, Write};

/// Output of one encoding pass: the stream plus the tokens that built it
#[derive(Clone, Debug)]
pub struct Encoded {
    pub data: Vec<u8>,
    pub tokens: Vec<Token>,
    pub stats: CodecStats,
}

/// Greedy sliding-window encoder
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a complete input into a padded bit stream
    pub fn encode(&self, input: &[u8]) -> Encoded {
        let format = self.config.format();
        let widths = self.config.widths();

        let mut window = SlidingWindow::new(
            input,
            self.config.window_size(),
            self.config.buffer_size(),
            self.config.search(),
        );
        let mut writer = BitWriter::with_capacity(input.len() / 2 + 16);
        let mut tokens = Vec::new();
        let mut stats = CodecStats { original_bytes: input.len() as u64, ..Default::default() };

        while !window.is_exhausted() {
            let found = window.find_match();
            let literal = window.lookahead().get(found.length).copied();

            let token = if found.length == 0 {
                // Lookahead is non-empty, so a literal always exists here
                Token::literal(literal.unwrap_or_default())
            } else {
                Token::copy(found.distance, found.length, literal)
            };

            log::trace!("{} at {}", token, window.position());
            format.write_token(&mut writer, &token, &widths);
            stats.record(&token);
            tokens.push(token);

            window.advance(token.uncompressed_size());
        }

        let data = writer.finish();
        stats.compressed_bytes = data.len() as u64;

        log::debug!(
            "Encoded {} bytes into {} bytes ({} tokens, {} matches, {:?})",
            stats.original_bytes,
            stats.compressed_bytes,
            stats.tokens,
            stats.match_tokens,
            format
        );

        Encoded { data, tokens, stats }
    }

    /// Read all of `input`, encode it, and write the stream to `output`
    pub fn compress<R: Read, W: Write>(&self, mut input: R, mut output: W) -> Result<CodecStats> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;

        let encoded = self.encode(&buffer);
        output.write_all(&encoded.data)?;
        output.flush()?;

        Ok(encoded.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SearchStrategy, TokenFormat};

    fn config(window_size: usize, buffer_size: usize) -> CodecConfig {
        CodecConfig::new(window_size, buffer_size).unwrap()
    }

    #[test]
    fn test_abracadabra_trace() {
        let encoded = Encoder::new(config(11, 11)).encode(b"ABRACADABRA");
        assert_eq!(
            encoded.tokens,
            vec![
                Token::literal(b'A'),
                Token::literal(b'B'),
                Token::literal(b'R'),
                Token::copy(3, 1, Some(b'C')),
                Token::copy(2, 1, Some(b'D')),
                Token::copy(7, 4, None),
            ]
        );
        assert_eq!(encoded.stats.tokens, 6);
        assert_eq!(encoded.stats.longest_match, 4);
    }

    #[test]
    fn test_abracadabra_lz77_bytes() {
        let config = config(11, 11).with_format(TokenFormat::Lz77);
        let encoded = Encoder::new(config).encode(b"ABRACADABRA");
        assert_eq!(
            encoded.data,
            vec![0x00, 0x41, 0x00, 0x42, 0x00, 0x52, 0x21, 0x43, 0x11, 0x44, 0x64]
        );
        assert_eq!(encoded.stats.compressed_bytes, 11);
    }

    #[test]
    fn test_repeated_bytes_trace() {
        let encoded = Encoder::new(config(10, 10)).encode(b"AAAAAAAAAA");
        assert_eq!(
            encoded.tokens,
            vec![
                Token::literal(b'A'),
                Token::copy(1, 1, Some(b'A')),
                Token::copy(3, 3, Some(b'A')),
                Token::copy(3, 3, None),
            ]
        );
    }

    #[test]
    fn test_match_length_capped_below_buffer_size() {
        let input = vec![b'z'; 64];
        let encoded = Encoder::new(config(64, 4)).encode(&input);
        assert!(encoded.tokens.iter().all(|t| t.length <= 3));
        assert!(encoded.tokens.iter().all(|t| t.distance <= 64));
    }

    #[test]
    fn test_empty_input() {
        let encoded = Encoder::new(CodecConfig::default()).encode(b"");
        assert!(encoded.data.is_empty());
        assert!(encoded.tokens.is_empty());
        assert_eq!(encoded.stats, CodecStats::default());
    }

    #[test]
    fn test_strategies_produce_same_stream() {
        let input: Vec<u8> = b"the quick brown fox jumps over the lazy dog; the quick dog"
            .iter()
            .cycle()
            .take(2000)
            .copied()
            .collect();
        let base = config(100, 20);
        let indexed = Encoder::new(base).encode(&input);
        let brute = Encoder::new(base.with_search(SearchStrategy::BruteForce)).encode(&input);
        assert_eq!(indexed.tokens, brute.tokens);
        assert_eq!(indexed.data, brute.data);
    }

    #[test]
    fn test_compress_stream() {
        let encoder = Encoder::new(config(11, 11).with_format(TokenFormat::Lzss));
        let mut output = Vec::new();
        let stats = encoder.compress(&b"ABRACADABRA"[..], &mut output).unwrap();
        assert_eq!(output, vec![0x20, 0x90, 0x8a, 0x52, 0x14, 0x38, 0x8a, 0x25, 0x90]);
        assert_eq!(stats.original_bytes, 11);
        assert_eq!(stats.compressed_bytes, 9);
    }
}
