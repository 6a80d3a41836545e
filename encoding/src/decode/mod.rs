//! Data element header decoding.
//!
//! The [`Decode`] trait reads element headers and sequence item headers
//! from a byte source.
//! [`BasicDecode`] reads binary numbers in the byte order of the source.

use self::basic::BasicDecoder;
use self::explicit::ExplicitVRDecoder;
use self::implicit_le::StandardImplicitVRLittleEndianDecoder;
use byteordered::Endianness;
use dcmio_core::header::{DataElementHeader, SequenceItemHeader, SequenceItemHeaderError};
use dcmio_core::Tag;
use snafu::{Backtrace, Snafu};
use std::io::{self, Read};

pub mod basic;
pub mod explicit;
pub mod implicit_le;

/// Module-level error type:
/// for errors which may occur while decoding DICOM data.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to read the beginning (tag) of the header: {}", source))]
    ReadHeaderTag {
        backtrace: Option<Backtrace>,
        source: io::Error,
    },
    #[snafu(display("Failed to read the item header: {}", source))]
    ReadItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's item length field: {}", source))]
    ReadItemLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's tag field: {}", source))]
    ReadTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's reserved bytes: {}", source))]
    ReadReserved {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's element length field: {}", source))]
    ReadLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's value representation: {}", source))]
    ReadVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Bad sequence item header: {}", source))]
    BadSequenceHeader { source: SequenceItemHeaderError },
}

impl Error {
    /// Whether the source ended cleanly,
    /// right before the first byte of a new element header.
    pub fn is_end_of_source(&self) -> bool {
        matches!(self, Error::ReadHeaderTag { source, .. }
            if source.kind() == io::ErrorKind::UnexpectedEof)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Obtain a data element decoder for reading the data elements in a DICOM
/// file's meta information group. These are always encoded in
/// Explicit VR Little Endian.
pub fn file_header_decoder() -> ExplicitVRDecoder {
    ExplicitVRDecoder::little_endian()
}

/// Type trait for reading and decoding basic data values from a data source.
///
/// This trait provides methods for reading binary numbers based on the
/// source's endianness.
/// The `_into` variants fill a whole slice at once,
/// which is how multi-valued binary values are read.
pub trait BasicDecode {
    /// Retrieve the source's endianness, as expected by this decoder.
    fn endianness(&self) -> Endianness;

    /// Decode an unsigned short value from the given source.
    fn decode_us<S>(&self, source: S) -> io::Result<u16>
    where
        S: Read;

    /// Decode a sequence of unsigned shorts from the given source.
    fn decode_us_into<S>(&self, source: S, target: &mut [u16]) -> io::Result<()>
    where
        S: Read;

    /// Decode an unsigned long value from the given source.
    fn decode_ul<S>(&self, source: S) -> io::Result<u32>
    where
        S: Read;

    /// Decode a sequence of unsigned longs from the given source.
    fn decode_ul_into<S>(&self, source: S, target: &mut [u32]) -> io::Result<()>
    where
        S: Read;

    /// Decode a sequence of unsigned very long values from the given source.
    fn decode_uv_into<S>(&self, source: S, target: &mut [u64]) -> io::Result<()>
    where
        S: Read;

    /// Decode a sequence of signed shorts from the given source.
    fn decode_ss_into<S>(&self, source: S, target: &mut [i16]) -> io::Result<()>
    where
        S: Read;

    /// Decode a sequence of signed longs from the given source.
    fn decode_sl_into<S>(&self, source: S, target: &mut [i32]) -> io::Result<()>
    where
        S: Read;

    /// Decode a sequence of signed very long values from the given source.
    fn decode_sv_into<S>(&self, source: S, target: &mut [i64]) -> io::Result<()>
    where
        S: Read;

    /// Decode a sequence of single precision floats from the given source.
    fn decode_fl_into<S>(&self, source: S, target: &mut [f32]) -> io::Result<()>
    where
        S: Read;

    /// Decode a sequence of double precision floats from the given source.
    fn decode_fd_into<S>(&self, source: S, target: &mut [f64]) -> io::Result<()>
    where
        S: Read;

    /// Decode a DICOM attribute tag from the given source.
    fn decode_tag<S>(&self, mut source: S) -> io::Result<Tag>
    where
        S: Read,
    {
        let g = self.decode_us(&mut source)?;
        let e = self.decode_us(source)?;
        Ok(Tag(g, e))
    }
}

/// Type trait for reading and decoding DICOM data element headers.
///
/// The resulting header is always the start of either
/// a data element, a sequence item or a delimiter.
pub trait Decode {
    /// Fetch and decode the next data element header from the given source.
    /// Returns the header together with the number of bytes read.
    ///
    /// Headers of sequence items and delimiters are also read here,
    /// with the VR set to UN.
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read;

    /// Fetch and decode the next sequence item header from the given source.
    /// Item headers are always eight bytes long.
    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read;

    /// Decode a DICOM attribute tag from the given source.
    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read;
}

impl<T: ?Sized> Decode for &T
where
    T: Decode,
{
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        (**self).decode_header(source)
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        (**self).decode_item_header(source)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        (**self).decode_tag(source)
    }
}

/// A data element decoder for any of the uncompressed encodings,
/// chosen at run-time.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementDecoder {
    /// Implicit VR Little Endian,
    /// with value representations obtained from the standard dictionary
    ImplicitVRLittleEndian(StandardImplicitVRLittleEndianDecoder),
    /// Explicit VR, in either byte order
    ExplicitVR(ExplicitVRDecoder),
}

impl ElementDecoder {
    /// The byte order of the data decoded.
    pub fn endianness(&self) -> Endianness {
        match self {
            ElementDecoder::ImplicitVRLittleEndian(_) => Endianness::Little,
            ElementDecoder::ExplicitVR(d) => d.endianness(),
        }
    }

    /// Whether value representations are present in element headers.
    pub fn is_explicit_vr(&self) -> bool {
        matches!(self, ElementDecoder::ExplicitVR(_))
    }

    /// Obtain the basic decoder for reading binary values.
    pub fn basic(&self) -> BasicDecoder {
        BasicDecoder::from(self.endianness())
    }
}

impl Decode for ElementDecoder {
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        match self {
            ElementDecoder::ImplicitVRLittleEndian(d) => d.decode_header(source),
            ElementDecoder::ExplicitVR(d) => d.decode_header(source),
        }
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        match self {
            ElementDecoder::ImplicitVRLittleEndian(d) => d.decode_item_header(source),
            ElementDecoder::ExplicitVR(d) => d.decode_item_header(source),
        }
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        match self {
            ElementDecoder::ImplicitVRLittleEndian(d) => d.decode_tag(source),
            ElementDecoder::ExplicitVR(d) => d.decode_tag(source),
        }
    }
}

/// Read the tag opening an element header.
///
/// Only a source ending before the first byte of the tag
/// is reported as [`Error::ReadHeaderTag`];
/// a tag cut short is [`Error::ReadTag`].
pub(crate) fn decode_header_tag<S>(basic: BasicDecoder, source: &mut S) -> Result<Tag>
where
    S: ?Sized + Read,
{
    use snafu::ResultExt;

    let mut buf = [0u8; 4];
    source.read_exact(&mut buf[..1]).context(ReadHeaderTagSnafu)?;
    source.read_exact(&mut buf[1..]).context(ReadTagSnafu)?;
    basic.decode_tag(&buf[..]).context(ReadTagSnafu)
}

/// Shared by every header decoder:
/// item headers have no VR in any of the encodings.
pub(crate) fn decode_item_header_with<S>(
    basic: BasicDecoder,
    source: &mut S,
) -> Result<SequenceItemHeader>
where
    S: ?Sized + Read,
{
    use dcmio_core::Length;
    use snafu::ResultExt;

    let mut buf = [0u8; 8];
    source.read_exact(&mut buf).context(ReadItemHeaderSnafu)?;
    let tag = basic.decode_tag(&buf[0..4]).context(ReadTagSnafu)?;
    let len = basic.decode_ul(&buf[4..8]).context(ReadItemLengthSnafu)?;
    SequenceItemHeader::new(tag, Length(len)).context(BadSequenceHeaderSnafu)
}
