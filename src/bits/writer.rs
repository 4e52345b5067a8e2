/// Bit-level writer for token streams
///
/// Writes fields MSB-first; the final partial byte is zero-padded.
pub struct BitWriter {
    /// Accumulated output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { output: Vec::with_capacity(65536), current_byte: 0, bits_in_byte: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), current_byte: 0, bits_in_byte: 0 }
    }

    /// Write the low `n` bits (0-32) of `value`, most significant first
    pub fn write_bits(&mut self, value: u32, n: u8) {
        debug_assert!(n <= 32);
        debug_assert!(n == 32 || value >> n == 0, "value {value} does not fit in {n} bits");

        let mut remaining = n;

        while remaining > 0 {
            let space = 8 - self.bits_in_byte;
            let to_write = remaining.min(space);

            // Take the top `to_write` of the remaining bits
            let chunk = ((value as u64 >> (remaining - to_write)) & ((1u64 << to_write) - 1)) as u8;
            self.current_byte |= chunk << (space - to_write);

            self.bits_in_byte += to_write;
            remaining -= to_write;

            if self.bits_in_byte == 8 {
                self.output.push(self.current_byte);
                self.current_byte = 0;
                self.bits_in_byte = 0;
            }
        }
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u32, 1);
    }

    /// Write an 8-bit field (not necessarily byte-aligned)
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        if self.bits_in_byte == 0 {
            self.output.push(byte);
        } else {
            self.write_bits(byte as u32, 8);
        }
    }

    /// Pad to byte boundary with zero bits
    pub fn align_to_byte(&mut self) {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Finish and return the output bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.output
    }

    /// Total bits written so far
    pub fn bit_len(&self) -> u64 {
        self.output.len() as u64 * 8 + self.bits_in_byte as u64
    }

    /// Get current output length in bytes (including partial byte)
    pub fn len(&self) -> usize {
        self.output.len() + if self.bits_in_byte > 0 { 1 } else { 0 }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.bits_in_byte == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitReader;

    #[test]
    fn test_write_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b110, 3);
        writer.write_bits(0b10011, 5);
        let output = writer.finish();
        assert_eq!(output, vec![0xD3]);
    }

    #[test]
    fn test_write_cross_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0, 4);
        writer.write_bits(0xFF, 8);
        writer.write_bits(0b1, 1);
        assert_eq!(writer.bit_len(), 13);
        assert_eq!(writer.len(), 2);
        let output = writer.finish();
        // 0000_1111 1111_1000 (last 3 bits are padding)
        assert_eq!(output, vec![0x0F, 0xF8]);
    }

    #[test]
    fn test_zero_width_field() {
        let mut writer = BitWriter::new();
        writer.write_bits(0, 0);
        assert!(writer.is_empty());
        writer.write_byte(0x41);
        assert_eq!(writer.finish(), vec![0x41]);
    }

    #[test]
    fn test_unaligned_byte() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        writer.write_byte(0x00);
        writer.write_bits(0x7F, 7);
        assert_eq!(writer.finish(), vec![0x80, 0x7F]);
    }

    #[test]
    fn test_reader_reads_back_fields() {
        let mut writer = BitWriter::new();
        writer.write_bits(5, 3);
        writer.write_bits(0, 0);
        writer.write_bits(1023, 10);
        writer.write_bits(0xDEAD_BEEF, 32);
        writer.write_bit(false);
        let output = writer.finish();

        let mut reader = BitReader::new(output.as_slice());
        assert_eq!(reader.read_bits(3).unwrap(), 5);
        assert_eq!(reader.read_bits(10).unwrap(), 1023);
        assert_eq!(reader.read_bits(32).unwrap(), 0xDEAD_BEEF);
        assert!(!reader.read_bit().unwrap());
    }
}
