//! Explicit VR header encoding, in little or big endian.

use crate::encode::basic::BasicEncoder;
use crate::encode::{
    write_item_marker, BasicEncode, Encode, Result, ValueTooLongSnafu, WriteHeaderSnafu,
    WriteItemDelimiterSnafu, WriteItemHeaderSnafu, WriteSequenceDelimiterSnafu, WriteTagSnafu,
};
use byteordered::Endianness;
use dcmio_core::header::{DataElementHeader, HasLength, Header};
use dcmio_core::vr::LengthField;
use dcmio_core::{Tag, VR};
use snafu::{ensure, ResultExt};
use std::io::Write;

/// A concrete encoder for the explicit VR transfer syntaxes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ExplicitVREncoder {
    basic: BasicEncoder,
}

impl ExplicitVREncoder {
    /// Create an encoder of Explicit VR Little Endian.
    pub fn little_endian() -> Self {
        ExplicitVREncoder {
            basic: BasicEncoder::LE,
        }
    }

    /// Create an encoder of Explicit VR Big Endian.
    pub fn big_endian() -> Self {
        ExplicitVREncoder {
            basic: BasicEncoder::BE,
        }
    }
}

impl Encode for ExplicitVREncoder {
    fn endianness(&self) -> Endianness {
        self.basic.endianness()
    }

    fn header_length(&self, vr: VR) -> u32 {
        vr.length_field().header_size()
    }

    fn encode_tag<W>(&self, to: &mut W, tag: Tag) -> Result<()>
    where
        W: ?Sized + Write,
    {
        let mut buf = [0u8; 4];
        self.basic
            .encode_tag(&mut buf[..], tag)
            .context(WriteTagSnafu)?;
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, to: &mut W, de: DataElementHeader) -> Result<usize>
    where
        W: ?Sized + Write,
    {
        let tag = de.tag();
        let vr = de.vr();
        let len = de.length();
        if !tag.has_vr() {
            write_item_marker(self.basic, to, tag, len.0).context(WriteHeaderSnafu)?;
            return Ok(8);
        }

        let field = vr.length_field();
        // undefined length is only expressible in the long form
        ensure!(
            len.0 <= field.max_length() || (field == LengthField::Long && len.is_undefined()),
            ValueTooLongSnafu {
                tag,
                vr,
                len,
                max: field.max_length(),
            }
        );

        let mut buf = [0u8; 12];
        self.basic
            .encode_tag(&mut buf[0..4], tag)
            .context(WriteHeaderSnafu)?;
        buf[4..6].copy_from_slice(&vr.to_bytes());
        let size = match field {
            LengthField::Short => {
                self.basic
                    .encode_us(&mut buf[6..8], len.0 as u16)
                    .context(WriteHeaderSnafu)?;
                8
            }
            LengthField::Long => {
                // bytes 6..8 are reserved and stay zeroed
                self.basic
                    .encode_ul(&mut buf[8..12], len.0)
                    .context(WriteHeaderSnafu)?;
                12
            }
        };
        to.write_all(&buf[..size]).context(WriteHeaderSnafu)?;
        Ok(size)
    }

    fn encode_item_header<W>(&self, to: &mut W, len: u32) -> Result<()>
    where
        W: ?Sized + Write,
    {
        write_item_marker(self.basic, to, Tag::ITEM, len).context(WriteItemHeaderSnafu)
    }

    fn encode_item_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        write_item_marker(self.basic, to, Tag::ITEM_DELIMITER, 0).context(WriteItemDelimiterSnafu)
    }

    fn encode_sequence_delimiter<W>(&self, to: &mut W) -> Result<()>
    where
        W: ?Sized + Write,
    {
        write_item_marker(self.basic, to, Tag::SEQUENCE_DELIMITER, 0)
            .context(WriteSequenceDelimiterSnafu)
    }
}
