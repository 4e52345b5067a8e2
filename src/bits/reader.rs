use crate::error::{Error, Result};
use std::io::Read;

/// Bit-level reader for token streams
///
/// Fields are stored MSB-first: the first bit of the stream is the most
/// significant bit of the first byte.
pub struct BitReader<R: Read> {
    reader: R,
    /// Buffer holding up to 64 bits, right-aligned
    buffer: u64,
    /// Number of valid bits in buffer (0-64)
    bits_available: u8,
    /// Total bytes read (for error reporting)
    bytes_read: u64,
    /// Set once the underlying reader returned 0 bytes
    eof: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buffer: 0, bits_available: 0, bytes_read: 0, eof: false }
    }

    /// Try to get at least `n` bits into the buffer.
    ///
    /// Stops quietly at end of input; callers decide whether a short
    /// buffer is padding or an error.
    fn fill_buffer(&mut self, n: u8) -> Result<()> {
        debug_assert!(n <= 57, "Cannot request more than 57 bits at once");

        while self.bits_available < n && !self.eof {
            // Room for whole bytes without overflowing the 64-bit buffer
            let bytes_to_read = ((64 - self.bits_available) / 8) as usize;
            let mut bulk_buf = [0u8; 8];

            match self.reader.read(&mut bulk_buf[..bytes_to_read]) {
                Ok(0) => self.eof = true,
                Ok(bytes_read) => {
                    for &byte in &bulk_buf[..bytes_read] {
                        self.buffer = (self.buffer << 8) | byte as u64;
                        self.bits_available += 8;
                    }
                    self.bytes_read += bytes_read as u64;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(())
    }

    /// Whether at least `n` more bits can be read before end of input
    pub fn has_bits(&mut self, n: u8) -> Result<bool> {
        self.fill_buffer(n)?;
        Ok(self.bits_available >= n)
    }

    /// Read `n` bits (0-32) as an MSB-first unsigned integer
    pub fn read_bits(&mut self, n: u8) -> Result<u32> {
        debug_assert!(n <= 32, "Cannot read more than 32 bits at once");

        if n == 0 {
            return Ok(0);
        }

        self.fill_buffer(n)?;
        if self.bits_available < n {
            return Err(Error::UnexpectedEof);
        }

        let shift = self.bits_available - n;
        let mask = (1u64 << n) - 1;
        let result = ((self.buffer >> shift) & mask) as u32;
        self.bits_available -= n;
        self.buffer &= (1u64 << self.bits_available).wrapping_sub(1);

        Ok(result)
    }

    /// Read a single bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read an 8-bit field (not necessarily byte-aligned)
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        self.read_bits(8).map(|v| v as u8)
    }

    /// Get position in bytes (approximate, for error reporting)
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
