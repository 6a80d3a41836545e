//! Explicit VR header decoding, in little or big endian.

use crate::decode::basic::BasicDecoder;
use crate::decode::{
    decode_header_tag, decode_item_header_with, BasicDecode, Decode, ReadItemLengthSnafu,
    ReadLengthSnafu, ReadReservedSnafu, ReadTagSnafu, ReadVrSnafu, Result,
};
use byteordered::Endianness;
use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmio_core::vr::LengthField;
use dcmio_core::{Tag, VR};
use snafu::ResultExt;
use std::io::Read;

/// A data element decoder for the explicit VR transfer syntaxes.
///
/// The length field width follows the VR read:
/// two bytes for the short form,
/// or two reserved bytes followed by four bytes for the long form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExplicitVRDecoder {
    basic: BasicDecoder,
}

impl ExplicitVRDecoder {
    /// Create a decoder of Explicit VR Little Endian.
    pub fn little_endian() -> Self {
        ExplicitVRDecoder {
            basic: BasicDecoder::LE,
        }
    }

    /// Create a decoder of Explicit VR Big Endian.
    pub fn big_endian() -> Self {
        ExplicitVRDecoder {
            basic: BasicDecoder::BE,
        }
    }

    /// The byte order of the data decoded.
    pub fn endianness(&self) -> Endianness {
        self.basic.endianness()
    }
}

impl Decode for ExplicitVRDecoder {
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        let tag = decode_header_tag(self.basic, source)?;

        let mut buf = [0u8; 4];
        if !tag.has_vr() {
            // item and delimiters carry no VR nor reserved field
            source.read_exact(&mut buf).context(ReadItemLengthSnafu)?;
            let len = self.basic.decode_ul(&buf[..]).context(ReadItemLengthSnafu)?;
            return Ok((DataElementHeader::new(tag, VR::UN, Length(len)), 8));
        }

        source.read_exact(&mut buf[0..2]).context(ReadVrSnafu)?;
        let vr = VR::from_binary([buf[0], buf[1]]).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown VR bytes {:02X} {:02X} in element {}, reading as UN",
                buf[0],
                buf[1],
                tag
            );
            VR::UN
        });

        let (len, bytes_read) = match vr.length_field() {
            LengthField::Short => {
                source.read_exact(&mut buf[0..2]).context(ReadLengthSnafu)?;
                let len = self.basic.decode_us(&buf[0..2]).context(ReadLengthSnafu)?;
                (u32::from(len), 8)
            }
            LengthField::Long => {
                source
                    .read_exact(&mut buf[0..2])
                    .context(ReadReservedSnafu)?;
                source.read_exact(&mut buf).context(ReadLengthSnafu)?;
                let len = self.basic.decode_ul(&buf[..]).context(ReadLengthSnafu)?;
                (len, 12)
            }
        };

        Ok((DataElementHeader::new(tag, vr, Length(len)), bytes_read))
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        decode_item_header_with(self.basic, source)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        self.basic.decode_tag(&buf[..]).context(ReadTagSnafu)
    }
}
