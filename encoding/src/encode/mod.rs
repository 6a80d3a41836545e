//! Data element header encoding.
//!
//! [`Encode`] writes element headers, item headers and delimiters
//! in the layout of a transfer syntax.
//! [`BasicEncode`] writes binary numbers in a given byte order.

use self::basic::BasicEncoder;
use self::explicit::ExplicitVREncoder;
use self::implicit_le::ImplicitVRLittleEndianEncoder;
use byteordered::Endianness;
use dcmio_core::header::{DataElementHeader, Tag};
use dcmio_core::value::PrimitiveValue;
use dcmio_core::{Length, VR};
use snafu::{Backtrace, Snafu};
use std::io::{self, Write};

pub mod basic;
pub mod explicit;
pub mod implicit_le;

/// Module-level error type:
/// for errors which may occur while encoding DICOM data.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to write tag"))]
    WriteTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write header"))]
    WriteHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item header"))]
    WriteItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item delimiter"))]
    WriteItemDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write sequence delimiter"))]
    WriteSequenceDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display(
        "Value length {} of element {} does not fit the {} length field (max {})",
        len,
        tag,
        vr,
        max
    ))]
    ValueTooLong {
        tag: Tag,
        vr: VR,
        len: Length,
        max: u32,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type trait for an encoder of basic data properties.
pub trait BasicEncode {
    /// Retrieve the encoder's endianness.
    fn endianness(&self) -> Endianness;

    /// Encode an unsigned short value to the given writer.
    fn encode_us<W>(&self, to: W, value: u16) -> io::Result<()>
    where
        W: Write;

    /// Encode an unsigned long value to the given writer.
    fn encode_ul<W>(&self, to: W, value: u32) -> io::Result<()>
    where
        W: Write;

    /// Encode an unsigned very long value to the given writer.
    fn encode_uv<W>(&self, to: W, value: u64) -> io::Result<()>
    where
        W: Write;

    /// Encode a signed short value to the given writer.
    fn encode_ss<W>(&self, to: W, value: i16) -> io::Result<()>
    where
        W: Write;

    /// Encode a signed long value to the given writer.
    fn encode_sl<W>(&self, to: W, value: i32) -> io::Result<()>
    where
        W: Write;

    /// Encode a signed very long value to the given writer.
    fn encode_sv<W>(&self, to: W, value: i64) -> io::Result<()>
    where
        W: Write;

    /// Encode a single precision float value to the given writer.
    fn encode_fl<W>(&self, to: W, value: f32) -> io::Result<()>
    where
        W: Write;

    /// Encode a double precision float value to the given writer.
    fn encode_fd<W>(&self, to: W, value: f64) -> io::Result<()>
    where
        W: Write;

    /// Encode a DICOM attribute tag to the given writer.
    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> io::Result<()>
    where
        W: Write,
    {
        self.encode_us(&mut to, tag.group())?;
        self.encode_us(to, tag.element())
    }

    /// Encode the binary form of a primitive value to the given writer.
    ///
    /// Textual values are written as their UTF-8 bytes,
    /// joined by backslashes.
    /// Callers in need of a specific character set
    /// should encode text themselves.
    /// No padding is applied.
    fn encode_primitive<W>(&self, mut to: W, value: &PrimitiveValue) -> io::Result<()>
    where
        W: Write,
    {
        use PrimitiveValue::*;
        match value {
            Empty => Ok(()),
            Str(s) => to.write_all(s.as_bytes()),
            Strs(s) => {
                for (i, s) in s.iter().enumerate() {
                    if i > 0 {
                        to.write_all(b"\\")?;
                    }
                    to.write_all(s.as_bytes())?;
                }
                Ok(())
            }
            U8(values) => to.write_all(values),
            I16(values) => values.iter().try_for_each(|v| self.encode_ss(&mut to, *v)),
            U16(values) => values.iter().try_for_each(|v| self.encode_us(&mut to, *v)),
            I32(values) => values.iter().try_for_each(|v| self.encode_sl(&mut to, *v)),
            U32(values) => values.iter().try_for_each(|v| self.encode_ul(&mut to, *v)),
            I64(values) => values.iter().try_for_each(|v| self.encode_sv(&mut to, *v)),
            U64(values) => values.iter().try_for_each(|v| self.encode_uv(&mut to, *v)),
            F32(values) => values.iter().try_for_each(|v| self.encode_fl(&mut to, *v)),
            F64(values) => values.iter().try_for_each(|v| self.encode_fd(&mut to, *v)),
            Tags(tags) => tags.iter().try_for_each(|t| self.encode_tag(&mut to, *t)),
        }
    }
}

/// Type trait for a data element header encoder.
pub trait Encode {
    /// Retrieve the encoder's endianness.
    fn endianness(&self) -> Endianness;

    /// The number of bytes taken by the header of an element
    /// with the given value representation.
    fn header_length(&self, vr: VR) -> u32;

    /// Encode and write an element tag.
    fn encode_tag<W>(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: ?Sized + Write;

    /// Encode and write a data element header to the given destination.
    /// Returns the number of bytes effectively written on success.
    ///
    /// Fails if the value length does not fit in the length field.
    fn encode_element_header<W>(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: ?Sized + Write;

    /// Encode and write a DICOM sequence item header to the given destination.
    fn encode_item_header<W>(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: ?Sized + Write;

    /// Encode and write a DICOM sequence item delimiter to the given destination.
    fn encode_item_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write;

    /// Encode and write a DICOM sequence delimiter to the given destination.
    fn encode_sequence_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write;
}

/// A data element encoder for any of the uncompressed encodings,
/// chosen at run-time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementEncoder {
    /// Implicit VR Little Endian
    ImplicitVRLittleEndian(ImplicitVRLittleEndianEncoder),
    /// Explicit VR, in either byte order
    ExplicitVR(ExplicitVREncoder),
}

impl ElementEncoder {
    /// Obtain the basic encoder for writing binary values.
    pub fn basic(&self) -> BasicEncoder {
        BasicEncoder::from(self.endianness())
    }

    /// Whether value representations are written in element headers.
    pub fn is_explicit_vr(&self) -> bool {
        matches!(self, ElementEncoder::ExplicitVR(_))
    }
}

macro_rules! dispatch {
    ($self: ident, $e: ident => $call: expr) => {
        match $self {
            ElementEncoder::ImplicitVRLittleEndian($e) => $call,
            ElementEncoder::ExplicitVR($e) => $call,
        }
    };
}

impl Encode for ElementEncoder {
    fn endianness(&self) -> Endianness {
        dispatch!(self, e => e.endianness())
    }

    fn header_length(&self, vr: VR) -> u32 {
        dispatch!(self, e => e.header_length(vr))
    }

    fn encode_tag<W>(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: ?Sized + Write,
    {
        dispatch!(self, e => e.encode_tag(to, tag))
    }

    fn encode_element_header<W>(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: ?Sized + Write,
    {
        dispatch!(self, e => e.encode_element_header(to, de))
    }

    fn encode_item_header<W>(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: ?Sized + Write,
    {
        dispatch!(self, e => e.encode_item_header(to, len))
    }

    fn encode_item_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        dispatch!(self, e => e.encode_item_delimiter(to))
    }

    fn encode_sequence_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        dispatch!(self, e => e.encode_sequence_delimiter(to))
    }
}

/// Write an item header or delimiter:
/// always a tag and a 4-byte length, regardless of the transfer syntax.
pub(crate) fn write_item_marker<W>(
    basic: BasicEncoder,
    to: &mut W,
    tag: Tag,
    len: u32,
) -> io::Result<()>
where
    W: ?Sized + Write,
{
    let mut buf = [0u8; 8];
    basic.encode_tag(&mut buf[0..4], tag)?;
    basic.encode_ul(&mut buf[4..8], len)?;
    to.write_all(&buf)
}
