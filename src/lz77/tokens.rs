use std::fmt;

/// Number of bits needed to write `n` in binary (`bit_length(0) == 0`)
pub fn bit_length(n: usize) -> u8 {
    (usize::BITS - n.leading_zeros()) as u8
}

/// One unit of the token stream: copy `length` bytes from `distance` back,
/// then emit `literal`.
///
/// A literal-only token has `distance == 0` and `length == 0`. A token without
/// a literal only ever ends the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub distance: usize,
    pub length: usize,
    pub literal: Option<u8>,
}

impl Token {
    /// A token carrying only a literal byte
    pub fn literal(byte: u8) -> Self {
        Self { distance: 0, length: 0, literal: Some(byte) }
    }

    /// A back-reference followed by an optional literal
    pub fn copy(distance: usize, length: usize, literal: Option<u8>) -> Self {
        debug_assert!(length > 0 && distance > 0);
        Self { distance, length, literal }
    }

    /// Whether this token references earlier output
    #[inline]
    pub fn is_match(&self) -> bool {
        self.length > 0
    }

    /// Whether this token ends the stream without a trailing literal
    #[inline]
    pub fn is_terminator(&self) -> bool {
        self.literal.is_none()
    }

    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        self.length + self.literal.is_some() as usize
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal {
            Some(byte) if byte.is_ascii_graphic() || byte == b' ' => {
                write!(f, "({}, {}, {:?})", self.distance, self.length, byte as char)
            }
            Some(byte) => write!(f, "({}, {}, 0x{:02x})", self.distance, self.length, byte),
            None => write!(f, "({}, {}, <end>)", self.distance, self.length),
        }
    }
}

/// Field widths derived from the window and lookahead sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenWidths {
    pub distance_bits: u8,
    pub length_bits: u8,
}

impl TokenWidths {
    pub fn new(window_size: usize, buffer_size: usize) -> Self {
        Self {
            distance_bits: bit_length(window_size.saturating_sub(1)),
            length_bits: bit_length(buffer_size.saturating_sub(1)),
        }
    }

    /// Bits of the (distance, length) pair
    #[inline]
    pub fn reference_bits(&self) -> u8 {
        self.distance_bits + self.length_bits
    }

    /// Bits of a complete fixed-width token
    #[inline]
    pub fn token_bits(&self) -> u8 {
        self.reference_bits() + 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(2), 2);
        assert_eq!(bit_length(3), 2);
        assert_eq!(bit_length(4), 3);
        assert_eq!(bit_length(10), 4);
        assert_eq!(bit_length(4095), 12);
        assert_eq!(bit_length(4096), 13);
    }

    #[test]
    fn test_widths() {
        let widths = TokenWidths::new(11, 11);
        assert_eq!(widths.distance_bits, 4);
        assert_eq!(widths.length_bits, 4);
        assert_eq!(widths.token_bits(), 16);

        let widths = TokenWidths::new(1, 2);
        assert_eq!(widths.distance_bits, 0);
        assert_eq!(widths.length_bits, 1);
        assert_eq!(widths.token_bits(), 9);

        let widths = TokenWidths::new(4096, 32);
        assert_eq!(widths.reference_bits(), 17);
    }

    #[test]
    fn test_uncompressed_size() {
        assert_eq!(Token::literal(b'A').uncompressed_size(), 1);
        assert_eq!(Token::copy(3, 4, Some(b'x')).uncompressed_size(), 5);
        assert_eq!(Token::copy(7, 4, None).uncompressed_size(), 4);
        assert!(Token::copy(7, 4, None).is_terminator());
        assert!(!Token::literal(0xFF).is_match());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::literal(b'A').to_string(), "(0, 0, 'A')");
        assert_eq!(Token::copy(2, 1, Some(0)).to_string(), "(2, 1, 0x00)");
        assert_eq!(Token::copy(7, 4, None).to_string(), "(7, 4, <end>)");
    }
}
