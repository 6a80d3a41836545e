//! Writers of binary numbers in either byte order.

use super::BasicEncode;
use byteordered::{ByteOrdered, Endianness};
use std::io::{self, Write};

/// A basic encoder of primitive elements,
/// with the byte order chosen at run-time.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum BasicEncoder {
    /// Encode in little endian
    LE,
    /// Encode in big endian
    BE,
}

impl Default for BasicEncoder {
    fn default() -> Self {
        BasicEncoder::LE
    }
}

impl From<Endianness> for BasicEncoder {
    fn from(endianness: Endianness) -> Self {
        match endianness {
            Endianness::Little => BasicEncoder::LE,
            Endianness::Big => BasicEncoder::BE,
        }
    }
}

impl BasicEncoder {
    fn writer<W: Write>(self, to: W) -> ByteOrdered<W, Endianness> {
        ByteOrdered::runtime(to, self.endianness())
    }
}

impl BasicEncode for BasicEncoder {
    fn endianness(&self) -> Endianness {
        match self {
            BasicEncoder::LE => Endianness::Little,
            BasicEncoder::BE => Endianness::Big,
        }
    }

    fn encode_us<W>(&self, to: W, value: u16) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_u16(value)
    }

    fn encode_ul<W>(&self, to: W, value: u32) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_u32(value)
    }

    fn encode_uv<W>(&self, to: W, value: u64) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_u64(value)
    }

    fn encode_ss<W>(&self, to: W, value: i16) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_i16(value)
    }

    fn encode_sl<W>(&self, to: W, value: i32) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_i32(value)
    }

    fn encode_sv<W>(&self, to: W, value: i64) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_i64(value)
    }

    fn encode_fl<W>(&self, to: W, value: f32) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_f32(value)
    }

    fn encode_fd<W>(&self, to: W, value: f64) -> io::Result<()>
    where
        W: Write,
    {
        self.writer(to).write_f64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_both_byte_orders() {
        let mut out = Vec::new();
        BasicEncoder::LE.encode_ul(&mut out, 0x0102_0304).unwrap();
        BasicEncoder::BE.encode_ul(&mut out, 0x0102_0304).unwrap();
        assert_eq!(out, vec![0x04, 0x03, 0x02, 0x01, 0x01, 0x02, 0x03, 0x04]);

        let mut out = Vec::new();
        BasicEncoder::BE.encode_fd(&mut out, 1.0).unwrap();
        assert_eq!(out, vec![0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
    }
}
