//! This module provides the stateful decoder,
//! which binds a data element header decoder to a byte source
//! and reads primitive values according to their value representation.

use dcmio_core::header::{DataElementHeader, SequenceItemHeader, Tag};
use dcmio_core::value::{PrimitiveValue, C};
use dcmio_core::vr::{BinaryKind, ValueKind, VR};
use dcmio_encoding::decode::basic::BasicDecoder;
use dcmio_encoding::decode::{self, BasicDecode, Decode, ElementDecoder};
use dcmio_encoding::text::{DecodeTextError, SpecificCharacterSet, TextKind};
use dcmio_encoding::transfer_syntax::TransferSyntax;
use smallvec::smallvec;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::io::{self, Read};

#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not decode element header at position {}", position))]
    DecodeElementHeader {
        position: u64,
        #[snafu(backtrace)]
        source: decode::Error,
    },
    #[snafu(display("Could not decode item header at position {}", position))]
    DecodeItemHeader {
        position: u64,
        #[snafu(backtrace)]
        source: decode::Error,
    },
    #[snafu(display("Could not read value from source at position {}", position))]
    ReadValueData {
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not skip {} bytes at position {}", len, position))]
    SkipValueData {
        len: u32,
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Source ended after {} of {} skipped bytes", skipped, len))]
    SkipPastEnd {
        len: u32,
        skipped: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not decode text of element {}", tag))]
    DecodeText {
        tag: Tag,
        #[snafu(backtrace)]
        source: DecodeTextError,
    },
    #[snafu(display("Invalid decimal string {:?} in element {}", text, tag))]
    ParseDecimal {
        tag: Tag,
        text: String,
        source: std::num::ParseFloatError,
        backtrace: Backtrace,
    },
    #[snafu(display("Invalid integer string {:?} in element {}", text, tag))]
    ParseInteger {
        tag: Tag,
        text: String,
        source: std::num::ParseIntError,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Value length {} of element {} ({}) is not a multiple of {}",
        len,
        tag,
        vr,
        width
    ))]
    UnexpectedValueLength {
        tag: Tag,
        vr: VR,
        len: u32,
        width: u32,
        backtrace: Backtrace,
    },
    #[snafu(display("Undefined value length of element {}", tag))]
    UndefinedValueLength { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Element {} is a sequence, not a primitive value", tag))]
    NonPrimitiveValue { tag: Tag, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type trait for reading DICOM content from a bound source,
/// one header or one value at a time.
///
/// Text values are decoded with the specific character set
/// provided by the caller,
/// since the decoder itself is shared by nested data set cursors
/// which may each be under a different character set.
pub trait StatefulDecode {
    /// Same as `Decode::decode_header` over the bound source.
    ///
    /// Returns `None` if the source ended
    /// right where the next header would begin.
    fn decode_header(&mut self) -> Result<Option<DataElementHeader>>;

    /// Same as `Decode::decode_item_header` over the bound source.
    fn decode_item_header(&mut self) -> Result<SequenceItemHeader>;

    /// Eagerly read the following data in the source as a primitive data
    /// value. Numbers in text form (DS, IS) are converted into
    /// the corresponding binary number types.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O problems,
    /// on values which do not conform to their value representation,
    /// or if the header describes a sequence.
    fn read_value(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue>;

    /// Eagerly read the following data in the source as a primitive data
    /// value. Unlike `read_value`, numbers saved as text are kept as strings.
    fn read_value_preserved(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue>;

    /// Eagerly read the following data in the source as raw bytes,
    /// regardless of the value representation.
    fn read_value_bytes(&mut self, header: &DataElementHeader) -> Result<PrimitiveValue>;

    /// Read the given number of bytes from the source.
    fn read_bytes(&mut self, len: u32) -> Result<Vec<u8>>;

    /// Consume and discard the given number of bytes from the source.
    fn skip_bytes(&mut self, len: u32) -> Result<()>;

    /// The number of bytes read so far by the decoder.
    fn position(&self) -> u64;
}

impl<T: ?Sized + StatefulDecode> StatefulDecode for &mut T {
    fn decode_header(&mut self) -> Result<Option<DataElementHeader>> {
        (**self).decode_header()
    }

    fn decode_item_header(&mut self) -> Result<SequenceItemHeader> {
        (**self).decode_item_header()
    }

    fn read_value(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue> {
        (**self).read_value(header, charset)
    }

    fn read_value_preserved(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue> {
        (**self).read_value_preserved(header, charset)
    }

    fn read_value_bytes(&mut self, header: &DataElementHeader) -> Result<PrimitiveValue> {
        (**self).read_value_bytes(header)
    }

    fn read_bytes(&mut self, len: u32) -> Result<Vec<u8>> {
        (**self).read_bytes(len)
    }

    fn skip_bytes(&mut self, len: u32) -> Result<()> {
        (**self).skip_bytes(len)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }
}

/// The initial capacity of the decoder's text buffer.
const PARSER_BUFFER_CAPACITY: usize = 2048;

/// A stateful abstraction for the full DICOM content reading process.
/// `S` is the type of the byte source.
/// The header decoder and the basic decoder
/// are chosen at run-time from the transfer syntax.
#[derive(Debug)]
pub struct StatefulDecoder<S> {
    from: S,
    decoder: ElementDecoder,
    basic: BasicDecoder,
    buffer: Vec<u8>,
    position: u64,
}

impl<S> StatefulDecoder<S>
where
    S: Read,
{
    /// Create a new stateful decoder for data in the given transfer syntax.
    pub fn new(from: S, ts: &TransferSyntax) -> Self {
        Self::new_with(from, ts.decoder())
    }

    /// Create a new stateful decoder from a header decoder.
    pub fn new_with(from: S, decoder: ElementDecoder) -> Self {
        let basic = decoder.basic();
        StatefulDecoder {
            from,
            decoder,
            basic,
            buffer: Vec::with_capacity(PARSER_BUFFER_CAPACITY),
            position: 0,
        }
    }

    /// Create a new stateful decoder for reading the file meta group,
    /// which is always in _Explicit VR Little Endian_.
    pub fn file_header_parser(from: S) -> Self {
        Self::new_with(from, ElementDecoder::ExplicitVR(decode::file_header_decoder()))
    }

    /// Set the position of the decoder,
    /// for sources which do not start at the beginning of the stream.
    pub fn with_position(mut self, position: u64) -> Self {
        self.position = position;
        self
    }

    /// Whether value representations are read from element headers.
    pub fn is_explicit_vr(&self) -> bool {
        self.decoder.is_explicit_vr()
    }

    /// Recover the underlying source.
    pub fn into_inner(self) -> S {
        self.from
    }

    fn require_known_length(&self, header: &DataElementHeader) -> Result<u32> {
        header
            .len
            .get()
            .context(UndefinedValueLengthSnafu { tag: header.tag })
    }

    /// Fill the text buffer with the next `len` bytes.
    fn read_buffer(&mut self, len: u32) -> Result<()> {
        self.buffer.resize(len as usize, 0);
        self.from
            .read_exact(&mut self.buffer)
            .context(ReadValueDataSnafu {
                position: self.position,
            })?;
        self.position += u64::from(len);
        Ok(())
    }

    fn read_value_binary(
        &mut self,
        header: &DataElementHeader,
        kind: BinaryKind,
    ) -> Result<PrimitiveValue> {
        let len = self.require_known_length(header)?;
        let width = kind.width();
        ensure!(
            len % width == 0,
            UnexpectedValueLengthSnafu {
                tag: header.tag,
                vr: header.vr,
                len,
                width,
            }
        );
        let n = (len / width) as usize;

        macro_rules! read_into {
            ($method: ident, $variant: ident, $t: ty) => {{
                let mut buf: C<$t> = smallvec![Default::default(); n];
                self.basic
                    .$method(&mut self.from, &mut buf[..])
                    .context(ReadValueDataSnafu {
                        position: self.position,
                    })?;
                PrimitiveValue::$variant(buf)
            }};
        }

        let value = match kind {
            BinaryKind::U8 => {
                let mut buf: C<u8> = smallvec![0; n];
                self.from
                    .read_exact(&mut buf)
                    .context(ReadValueDataSnafu {
                        position: self.position,
                    })?;
                PrimitiveValue::U8(buf)
            }
            BinaryKind::I16 => read_into!(decode_ss_into, I16, i16),
            BinaryKind::U16 => read_into!(decode_us_into, U16, u16),
            BinaryKind::I32 => read_into!(decode_sl_into, I32, i32),
            BinaryKind::U32 => read_into!(decode_ul_into, U32, u32),
            BinaryKind::I64 => read_into!(decode_sv_into, I64, i64),
            BinaryKind::U64 => read_into!(decode_uv_into, U64, u64),
            BinaryKind::F32 => read_into!(decode_fl_into, F32, f32),
            BinaryKind::F64 => read_into!(decode_fd_into, F64, f64),
        };
        self.position += u64::from(len);
        Ok(value)
    }

    fn read_value_tag(&mut self, header: &DataElementHeader) -> Result<PrimitiveValue> {
        let len = self.require_known_length(header)?;
        ensure!(
            len % 4 == 0,
            UnexpectedValueLengthSnafu {
                tag: header.tag,
                vr: header.vr,
                len,
                width: 4_u32,
            }
        );
        let mut parts: C<u16> = smallvec![0; (len / 2) as usize];
        self.basic
            .decode_us_into(&mut self.from, &mut parts[..])
            .context(ReadValueDataSnafu {
                position: self.position,
            })?;
        self.position += u64::from(len);
        Ok(PrimitiveValue::Tags(
            parts.chunks_exact(2).map(|p| Tag(p[0], p[1])).collect(),
        ))
    }

    /// Read a textual value and decode it with the character set
    /// which applies to its value representation.
    fn read_text(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<String> {
        let len = self.require_known_length(header)?;
        self.read_buffer(len)?;
        let buf = trim_trail_empty_bytes(&self.buffer);
        let text = if header.vr.descriptor().uses_specific_charset() {
            charset.decode_text(buf, TextKind::for_vr(header.vr))
        } else {
            SpecificCharacterSet::Default.decode_text(buf, TextKind::Multi)
        };
        text.context(DecodeTextSnafu { tag: header.tag })
    }

    fn read_value_ds(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue> {
        let text = self.read_text(header, charset)?;
        if text.is_empty() {
            return Ok(PrimitiveValue::Empty);
        }
        let parts: Result<C<f64>> = text
            .split('\\')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>().context(ParseDecimalSnafu {
                    tag: header.tag,
                    text: part,
                })
            })
            .collect();
        Ok(PrimitiveValue::F64(parts?))
    }

    fn read_value_is(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue> {
        let text = self.read_text(header, charset)?;
        if text.is_empty() {
            return Ok(PrimitiveValue::Empty);
        }
        let parts: Result<C<i64>> = text
            .split('\\')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>().context(ParseIntegerSnafu {
                    tag: header.tag,
                    text: part,
                })
            })
            .collect();
        Ok(PrimitiveValue::I64(parts?))
    }

    fn read_value_strs(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue> {
        let text = self.read_text(header, charset)?;
        Ok(text_value(header.vr, text))
    }
}

impl<S> StatefulDecode for StatefulDecoder<S>
where
    S: Read,
{
    fn decode_header(&mut self) -> Result<Option<DataElementHeader>> {
        match self.decoder.decode_header(&mut self.from) {
            Ok((header, bytes_read)) => {
                self.position += bytes_read as u64;
                Ok(Some(header))
            }
            Err(e) if e.is_end_of_source() => Ok(None),
            Err(e) => Err(e).context(DecodeElementHeaderSnafu {
                position: self.position,
            }),
        }
    }

    fn decode_item_header(&mut self) -> Result<SequenceItemHeader> {
        let header = self
            .decoder
            .decode_item_header(&mut self.from)
            .context(DecodeItemHeaderSnafu {
                position: self.position,
            })?;
        self.position += 8;
        Ok(header)
    }

    fn read_value(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue> {
        if header.len.get() == Some(0) {
            return Ok(PrimitiveValue::Empty);
        }
        match header.vr.descriptor().kind {
            ValueKind::Decimal => self.read_value_ds(header, charset),
            ValueKind::Integer => self.read_value_is(header, charset),
            _ => self.read_value_preserved(header, charset),
        }
    }

    fn read_value_preserved(
        &mut self,
        header: &DataElementHeader,
        charset: &SpecificCharacterSet,
    ) -> Result<PrimitiveValue> {
        if header.len.get() == Some(0) {
            return Ok(PrimitiveValue::Empty);
        }
        match header.vr.descriptor().kind {
            ValueKind::Sequence => NonPrimitiveValueSnafu { tag: header.tag }.fail(),
            ValueKind::Binary(kind) => self.read_value_binary(header, kind),
            ValueKind::Tags => self.read_value_tag(header),
            ValueKind::Ascii | ValueKind::Text | ValueKind::Decimal | ValueKind::Integer => {
                self.read_value_strs(header, charset)
            }
        }
    }

    fn read_value_bytes(&mut self, header: &DataElementHeader) -> Result<PrimitiveValue> {
        let len = self.require_known_length(header)?;
        if len == 0 {
            return Ok(PrimitiveValue::Empty);
        }
        let bytes = self.read_bytes(len)?;
        Ok(PrimitiveValue::U8(C::from_vec(bytes)))
    }

    fn read_bytes(&mut self, len: u32) -> Result<Vec<u8>> {
        let mut buf = vec![0; len as usize];
        self.from
            .read_exact(&mut buf)
            .context(ReadValueDataSnafu {
                position: self.position,
            })?;
        self.position += u64::from(len);
        Ok(buf)
    }

    fn skip_bytes(&mut self, len: u32) -> Result<()> {
        let skipped = io::copy(
            &mut (&mut self.from).take(u64::from(len)),
            &mut io::sink(),
        )
        .context(SkipValueDataSnafu {
            len,
            position: self.position,
        })?;
        self.position += skipped;
        ensure!(skipped == u64::from(len), SkipPastEndSnafu { len, skipped });
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position
    }
}

/// Remove trailing spaces and null characters,
/// the two padding bytes of textual values.
fn trim_trail_empty_bytes(mut x: &[u8]) -> &[u8] {
    while let [rest @ .., b' ' | 0] = x {
        x = rest;
    }
    x
}

/// Turn decoded text into a value:
/// one string for single valued representations,
/// the backslash separated components otherwise.
fn text_value(vr: VR, text: String) -> PrimitiveValue {
    if text.is_empty() {
        PrimitiveValue::Empty
    } else if vr.is_single_valued() {
        PrimitiveValue::Str(text)
    } else {
        PrimitiveValue::Strs(text.split('\\').map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{StatefulDecode, StatefulDecoder};
    use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
    use dcmio_core::{dcm_value, PrimitiveValue, Tag, VR};
    use dcmio_encoding::text::SpecificCharacterSet;
    use dcmio_encoding::transfer_syntax::{
        EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
    };

    #[test]
    fn decode_headers_and_values_explicit_le() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0008,0060) Modality CS, len 2, "MR"
            0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00, b'M', b'R',
            // (0028,0010) Rows US, len 2, 512
            0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x00, 0x02,
            // (0028,0030) PixelSpacing DS, len 10, "0.5\0.625 "
            0x28, 0x00, 0x30, 0x00, b'D', b'S', 0x0a, 0x00,
            b'0', b'.', b'5', b'\\', b'0', b'.', b'6', b'2', b'5', b' ',
        ];
        let cs = SpecificCharacterSet::Default;
        let mut decoder = StatefulDecoder::new(DATA, &EXPLICIT_VR_LITTLE_ENDIAN);

        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(header, DataElementHeader::new(Tag(0x0008, 0x0060), VR::CS, Length(2)));
        let value = decoder.read_value(&header, &cs).unwrap();
        assert_eq!(value, dcm_value!(Strs, ["MR"]));
        assert_eq!(decoder.position(), 10);

        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(header.vr, VR::US);
        assert_eq!(decoder.read_value(&header, &cs).unwrap(), dcm_value!(U16, [512]));

        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(header.vr, VR::DS);
        assert_eq!(
            decoder.read_value(&header, &cs).unwrap(),
            dcm_value!(F64, [0.5, 0.625])
        );
        assert_eq!(decoder.position(), DATA.len() as u64);

        // clean end of source
        assert_eq!(decoder.decode_header().unwrap(), None);
    }

    #[test]
    fn preserved_numbers_stay_text() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0020,0013) InstanceNumber IS, len 4, "+12 "
            0x20, 0x00, 0x13, 0x00, b'I', b'S', 0x04, 0x00, b'+', b'1', b'2', b' ',
        ];
        let mut decoder = StatefulDecoder::new(DATA, &EXPLICIT_VR_LITTLE_ENDIAN);
        let header = decoder.decode_header().unwrap().unwrap();
        let value = decoder
            .read_value_preserved(&header, &SpecificCharacterSet::Default)
            .unwrap();
        assert_eq!(value, dcm_value!(Strs, ["+12"]));

        let mut decoder = StatefulDecoder::new(DATA, &EXPLICIT_VR_LITTLE_ENDIAN);
        let header = decoder.decode_header().unwrap().unwrap();
        let value = decoder
            .read_value(&header, &SpecificCharacterSet::Default)
            .unwrap();
        assert_eq!(value, dcm_value!(I64, [12]));
    }

    #[test]
    fn decode_big_endian_words_and_tags() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0028,0009) FrameIncrementPointer AT, len 4, (0018,1063)
            0x00, 0x28, 0x00, 0x09, b'A', b'T', 0x00, 0x04, 0x00, 0x18, 0x10, 0x63,
            // (0018,0050) SliceThickness FL (not its standard VR), len 4, 1.5
            0x00, 0x18, 0x00, 0x50, b'F', b'L', 0x00, 0x04, 0x3f, 0xc0, 0x00, 0x00,
        ];
        let cs = SpecificCharacterSet::Default;
        let mut decoder = StatefulDecoder::new(DATA, &EXPLICIT_VR_BIG_ENDIAN);

        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(
            decoder.read_value(&header, &cs).unwrap(),
            dcm_value!(Tags, [Tag(0x0018, 0x1063)])
        );
        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(decoder.read_value(&header, &cs).unwrap(), dcm_value!(F32, [1.5]));
    }

    #[test]
    fn implicit_vr_uses_dictionary_and_charset() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0010,0010) PatientName, len 6, "Müller" in Latin-1 without padding
            0x10, 0x00, 0x10, 0x00, 0x06, 0x00, 0x00, 0x00,
            b'M', 0xFC, b'l', b'l', b'e', b'r',
        ];
        let cs = SpecificCharacterSet::from_code("ISO_IR 100").unwrap();
        let mut decoder = StatefulDecoder::new(DATA, &IMPLICIT_VR_LITTLE_ENDIAN);
        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(header.vr, VR::PN);
        assert_eq!(
            decoder.read_value(&header, &cs).unwrap(),
            dcm_value!(Strs, ["Müller"])
        );
    }

    #[test]
    fn single_valued_text_keeps_backslashes() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0020,4000) ImageComments LT, len 4, "a\b "
            0x20, 0x00, 0x00, 0x40, b'L', b'T', 0x04, 0x00, b'a', b'\\', b'b', b' ',
        ];
        let mut decoder = StatefulDecoder::new(DATA, &EXPLICIT_VR_LITTLE_ENDIAN);
        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(
            decoder
                .read_value(&header, &SpecificCharacterSet::Default)
                .unwrap(),
            PrimitiveValue::Str("a\\b".to_string())
        );
    }

    #[test]
    fn fixed_width_length_mismatch_is_an_error() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0028,0010) Rows US, len 3
            0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x03, 0x00, 0x00, 0x02, 0x00,
        ];
        let mut decoder = StatefulDecoder::new(DATA, &EXPLICIT_VR_LITTLE_ENDIAN);
        let header = decoder.decode_header().unwrap().unwrap();
        let err = decoder
            .read_value(&header, &SpecificCharacterSet::Default)
            .unwrap_err();
        assert!(matches!(
            err,
            super::Error::UnexpectedValueLength { len: 3, width: 2, .. }
        ));
    }

    #[test]
    fn raw_bytes_and_skipping() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0028,0010) Rows US, len 2, 512
            0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x00, 0x02,
            // item header, len 4, then 4 bytes of data
            0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00,
            0x01, 0x02, 0x03, 0x04,
        ];
        let mut decoder = StatefulDecoder::new(DATA, &EXPLICIT_VR_LITTLE_ENDIAN);
        let header = decoder.decode_header().unwrap().unwrap();
        assert_eq!(
            decoder.read_value_bytes(&header).unwrap(),
            dcm_value!(U8, [0x00, 0x02])
        );
        assert_eq!(
            decoder.decode_item_header().unwrap(),
            SequenceItemHeader::Item { len: Length(4) }
        );
        decoder.skip_bytes(4).unwrap();
        assert_eq!(decoder.position(), DATA.len() as u64);
        assert!(decoder.skip_bytes(2).is_err());
    }
}
