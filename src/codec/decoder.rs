use crate::bits::BitReader;
use crate::error::{Error, Result};
use crate::lz77::Token;
use crate::{CodecConfig, CodecStats};
use std::io::{Read, Write};

/// Output of one decoding pass: the original bytes plus the parsed tokens
#[derive(Clone, Debug)]
pub struct Decoded {
    pub data: Vec<u8>,
    pub tokens: Vec<Token>,
    pub stats: CodecStats,
}

/// Token stream decoder
///
/// Must be configured with the window size, buffer size and format used to
/// encode the stream.
pub struct Decoder {
    config: CodecConfig,
}

impl Decoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a complete stream held in memory
    pub fn decode(&self, data: &[u8]) -> Result<Decoded> {
        let mut decoded = self.decode_from(data)?;
        decoded.stats.compressed_bytes = data.len() as u64;
        Ok(decoded)
    }

    /// Read the stream from `input` and write the original bytes to `output`
    pub fn decompress<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<CodecStats> {
        let decoded = self.decode_from(input)?;
        output.write_all(&decoded.data)?;
        output.flush()?;
        Ok(decoded.stats)
    }

    fn decode_from<R: Read>(&self, input: R) -> Result<Decoded> {
        let format = self.config.format();
        let widths = self.config.widths();
        let mut reader = BitReader::new(input);

        let mut data = Vec::new();
        let mut tokens = Vec::new();
        let mut stats = CodecStats::default();

        while let Some(token) = format.read_token(&mut reader, &widths)? {
            log::trace!("{} at {}", token, data.len());
            apply_token(&mut data, &token)?;
            stats.record(&token);
            tokens.push(token);

            if token.is_terminator() {
                break;
            }
        }

        stats.original_bytes = data.len() as u64;
        stats.compressed_bytes = reader.bytes_read();

        log::debug!(
            "Decoded {} tokens into {} bytes ({:?})",
            stats.tokens,
            stats.original_bytes,
            format
        );

        Ok(Decoded { data, tokens, stats })
    }
}

/// Append the bytes represented by `token` to `output`.
///
/// The copy runs one byte at a time in increasing order: when `length`
/// exceeds `distance`, later source bytes are ones this token just wrote.
pub fn apply_token(output: &mut Vec<u8>, token: &Token) -> Result<()> {
    if token.length > 0 {
        if token.distance == 0 {
            return Err(Error::InvalidToken { distance: token.distance, length: token.length });
        }
        if token.distance > output.len() {
            return Err(Error::InvalidBackReference {
                distance: token.distance,
                available: output.len(),
            });
        }

        let start = output.len() - token.distance;
        output.reserve(token.length + 1);
        for i in 0..token.length {
            let byte = output[start + i];
            output.push(byte);
        }
    }

    if let Some(byte) = token.literal {
        output.push(byte);
    }
    Ok(())
}
