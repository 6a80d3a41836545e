//! Readers of binary numbers in either byte order.

use super::BasicDecode;
use byteordered::byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use byteordered::{ByteOrdered, Endianness};
use std::io::{self, Read};

/// A basic decoder of DICOM primitive values,
/// with the byte order chosen at run-time.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum BasicDecoder {
    /// Decode in little endian
    LE,
    /// Decode in big endian
    BE,
}

impl Default for BasicDecoder {
    fn default() -> Self {
        BasicDecoder::LE
    }
}

impl From<Endianness> for BasicDecoder {
    fn from(endianness: Endianness) -> Self {
        match endianness {
            Endianness::Little => BasicDecoder::LE,
            Endianness::Big => BasicDecoder::BE,
        }
    }
}

impl BasicDecoder {
    fn reader<S: Read>(self, source: S) -> ByteOrdered<S, Endianness> {
        ByteOrdered::runtime(source, self.endianness())
    }
}

/// Fill a slice of numbers in the decoder's byte order.
macro_rules! read_into {
    ($decoder: expr, $source: expr, $target: expr, $method: ident) => {{
        let mut source = $source;
        match $decoder {
            BasicDecoder::LE => source.$method::<LittleEndian>($target),
            BasicDecoder::BE => source.$method::<BigEndian>($target),
        }
    }};
}

impl BasicDecode for BasicDecoder {
    fn endianness(&self) -> Endianness {
        match self {
            BasicDecoder::LE => Endianness::Little,
            BasicDecoder::BE => Endianness::Big,
        }
    }

    fn decode_us<S>(&self, source: S) -> io::Result<u16>
    where
        S: Read,
    {
        self.reader(source).read_u16()
    }

    fn decode_us_into<S>(&self, source: S, target: &mut [u16]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_u16_into)
    }

    fn decode_ul<S>(&self, source: S) -> io::Result<u32>
    where
        S: Read,
    {
        self.reader(source).read_u32()
    }

    fn decode_ul_into<S>(&self, source: S, target: &mut [u32]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_u32_into)
    }

    fn decode_uv_into<S>(&self, source: S, target: &mut [u64]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_u64_into)
    }

    fn decode_ss_into<S>(&self, source: S, target: &mut [i16]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_i16_into)
    }

    fn decode_sl_into<S>(&self, source: S, target: &mut [i32]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_i32_into)
    }

    fn decode_sv_into<S>(&self, source: S, target: &mut [i64]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_i64_into)
    }

    fn decode_fl_into<S>(&self, source: S, target: &mut [f32]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_f32_into)
    }

    fn decode_fd_into<S>(&self, source: S, target: &mut [f64]) -> io::Result<()>
    where
        S: Read,
    {
        read_into!(self, source, target, read_f64_into)
    }
}
