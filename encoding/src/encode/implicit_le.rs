//! Implicit VR Little Endian header encoding.

use crate::encode::basic::BasicEncoder;
use crate::encode::{
    write_item_marker, BasicEncode, Encode, Result, WriteHeaderSnafu, WriteItemDelimiterSnafu,
    WriteItemHeaderSnafu, WriteSequenceDelimiterSnafu, WriteTagSnafu,
};
use byteordered::Endianness;
use dcmio_core::header::{DataElementHeader, HasLength, Header};
use dcmio_core::{Tag, VR};
use snafu::ResultExt;
use std::io::Write;

/// An encoder for the Implicit VR Little Endian transfer syntax.
/// Every header is the tag followed by a 4-byte length.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ImplicitVRLittleEndianEncoder;

impl Encode for ImplicitVRLittleEndianEncoder {
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    fn header_length(&self, _vr: VR) -> u32 {
        8
    }

    fn encode_tag<W>(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: ?Sized + Write,
    {
        let mut buf = [0u8; 4];
        BasicEncoder::LE
            .encode_tag(&mut buf[..], tag)
            .context(WriteTagSnafu)?;
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: ?Sized + Write,
    {
        write_item_marker(BasicEncoder::LE, to, de.tag(), de.length().0)
            .context(WriteHeaderSnafu)?;
        Ok(8)
    }

    fn encode_item_header<W>(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: ?Sized + Write,
    {
        write_item_marker(BasicEncoder::LE, to, Tag::ITEM, len).context(WriteItemHeaderSnafu)
    }

    fn encode_item_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        write_item_marker(BasicEncoder::LE, to, Tag::ITEM_DELIMITER, 0)
            .context(WriteItemDelimiterSnafu)
    }

    fn encode_sequence_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        write_item_marker(BasicEncoder::LE, to, Tag::SEQUENCE_DELIMITER, 0)
            .context(WriteSequenceDelimiterSnafu)
    }
}
