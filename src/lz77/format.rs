//! Token-to-bits mapping for the two stream variants.
//!
//! Match distances are stored as `distance - 1`, so a distance equal to the
//! full window still fits in `bit_length(window_size - 1)` bits. Literal-only
//! tokens are recognized by a zero length field.
//!
//! The last token of a stream may omit its literal. It is recognized by
//! position: after it, fewer than 8 bits (all zero padding) remain.

use super::tokens::{Token, TokenWidths};
use crate::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;

/// On-wire token encoding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TokenFormat {
    /// Every token is `distance | length | literal`
    Lz77,
    /// One flag bit, then `literal` or `distance | length | literal`
    #[default]
    Lzss,
}

impl TokenFormat {
    /// File name extension marking a compressed file (without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Lz77 => "LZ77",
            Self::Lzss => "LZSS",
        }
    }

    /// Detect the variant from a compressed file's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("LZ77") => Some(Self::Lz77),
            Some("LZSS") => Some(Self::Lzss),
            _ => None,
        }
    }

    /// Encoded size of `token` in bits
    pub fn token_bits(&self, token: &Token, widths: &TokenWidths) -> u64 {
        let literal_bits = if token.literal.is_some() { 8 } else { 0 };
        let body = match self {
            Self::Lz77 => widths.reference_bits() as u64,
            Self::Lzss if token.is_match() => 1 + widths.reference_bits() as u64,
            Self::Lzss => 1,
        };
        body + literal_bits
    }

    /// Append `token` to the stream
    pub fn write_token(&self, writer: &mut BitWriter, token: &Token, widths: &TokenWidths) {
        match self {
            Self::Lz77 => write_reference(writer, token, widths),
            Self::Lzss => {
                writer.write_bit(token.is_match());
                if token.is_match() {
                    write_reference(writer, token, widths);
                }
            }
        }

        if let Some(byte) = token.literal {
            writer.write_byte(byte);
        }
    }

    /// Read the next token, or `None` once only padding is left
    pub fn read_token<R: Read>(
        &self,
        reader: &mut BitReader<R>,
        widths: &TokenWidths,
    ) -> Result<Option<Token>> {
        match self {
            Self::Lz77 => read_lz77_token(reader, widths),
            Self::Lzss => read_lzss_token(reader, widths),
        }
    }
}

/// Serialize a token list into a padded byte stream
pub fn write_tokens(format: TokenFormat, widths: &TokenWidths, tokens: &[Token]) -> Vec<u8> {
    let bits: u64 = tokens.iter().map(|t| format.token_bits(t, widths)).sum();
    let mut writer = BitWriter::with_capacity(bits.div_ceil(8) as usize);
    for token in tokens {
        format.write_token(&mut writer, token, widths);
    }
    writer.finish()
}

fn write_reference(writer: &mut BitWriter, token: &Token, widths: &TokenWidths) {
    let distance_field = if token.is_match() { token.distance - 1 } else { 0 };
    writer.write_bits(distance_field as u32, widths.distance_bits);
    writer.write_bits(token.length as u32, widths.length_bits);
}

/// Read a (distance, length) pair and validate it
fn read_reference<R: Read>(
    reader: &mut BitReader<R>,
    widths: &TokenWidths,
) -> Result<(usize, usize)> {
    let distance_field = reader.read_bits(widths.distance_bits)? as usize;
    let length = reader.read_bits(widths.length_bits)? as usize;

    if length == 0 {
        if distance_field != 0 {
            return Err(Error::InvalidToken { distance: distance_field, length });
        }
        Ok((0, 0))
    } else {
        Ok((distance_field + 1, length))
    }
}

fn read_lz77_token<R: Read>(
    reader: &mut BitReader<R>,
    widths: &TokenWidths,
) -> Result<Option<Token>> {
    if reader.has_bits(widths.token_bits())? {
        let (distance, length) = read_reference(reader, widths)?;
        let literal = reader.read_byte()?;
        return Ok(Some(Token { distance, length, literal: Some(literal) }));
    }

    // A trailing reference without literal is the terminator; anything
    // shorter, or with a zero length, is padding
    if reader.has_bits(widths.reference_bits())? {
        let distance_field = reader.read_bits(widths.distance_bits)? as usize;
        let length = reader.read_bits(widths.length_bits)? as usize;
        if length > 0 {
            return Ok(Some(Token { distance: distance_field + 1, length, literal: None }));
        }
    }

    Ok(None)
}

fn read_lzss_token<R: Read>(
    reader: &mut BitReader<R>,
    widths: &TokenWidths,
) -> Result<Option<Token>> {
    if !reader.has_bits(1)? {
        return Ok(None);
    }

    if !reader.read_bit()? {
        if !reader.has_bits(8)? {
            return Ok(None);
        }
        return Ok(Some(Token::literal(reader.read_byte()?)));
    }

    if !reader.has_bits(widths.reference_bits())? {
        log::debug!("Ignoring truncated match token at end of stream");
        return Ok(None);
    }

    let (distance, length) = read_reference(reader, widths)?;
    if length == 0 {
        return Err(Error::InvalidToken { distance, length });
    }

    let literal = if reader.has_bits(8)? { Some(reader.read_byte()?) } else { None };
    Ok(Some(Token { distance, length, literal }))
}
