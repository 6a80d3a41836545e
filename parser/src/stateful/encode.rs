//! Module holding a stateful DICOM data encoding abstraction.
//!
//! The [`StatefulEncoder`] supports encoding of binary data and text
//! while applying the necessary padding to conform to DICOM encoding rules.
//! [`value_length`] computes the encoded length of a value ahead of writing,
//! where that is possible without encoding it.

use dcmio_core::value::ValueType;
use dcmio_core::vr::{BinaryKind, ValueKind};
use dcmio_core::{DataElementHeader, Length, PrimitiveValue, Tag, VR};
use dcmio_encoding::encode::basic::BasicEncoder;
use dcmio_encoding::encode::explicit::ExplicitVREncoder;
use dcmio_encoding::encode::{self, BasicEncode, Encode, ElementEncoder};
use dcmio_encoding::text::{EncodeTextError, SpecificCharacterSet, TextKind};
use dcmio_encoding::TransferSyntax;
use snafu::{ensure, Backtrace, ResultExt, Snafu};
use std::borrow::Cow;
use std::convert::TryFrom;
use std::io::Write;

#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to encode a data piece at position {}", position))]
    EncodeData {
        position: u64,
        #[snafu(backtrace)]
        source: encode::Error,
    },

    #[snafu(display("Could not encode text of element {}", tag))]
    EncodeText {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncodeTextError,
    },

    #[snafu(display("Could not write value data at position {}", position))]
    WriteValueData {
        position: u64,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Component {:?} of element {} contains a backslash", component, tag))]
    BackslashInComponent {
        tag: Tag,
        component: String,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Component {:?} of element {} exceeds the {} characters allowed in {}",
        component,
        tag,
        max,
        vr
    ))]
    ComponentTooLong {
        tag: Tag,
        vr: VR,
        component: String,
        max: u32,
        backtrace: Backtrace,
    },

    #[snafu(display("Cannot write {} as a decimal string in element {}", value, tag))]
    NonFiniteDecimal {
        tag: Tag,
        value: f64,
        backtrace: Backtrace,
    },

    #[snafu(display("Cannot write a value of type {:?} as {} in element {}", value_type, vr, tag))]
    IncompatibleValue {
        tag: Tag,
        vr: VR,
        value_type: ValueType,
        backtrace: Backtrace,
    },

    #[snafu(display("Value of element {} is too large ({} bytes)", tag, len))]
    ValueTooLarge {
        tag: Tag,
        len: usize,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Also called a printer, this encoder type provides a stateful mid-level
/// abstraction for writing DICOM content. Unlike `Encode`,
/// the stateful encoder knows how to write text values and keeps track
/// of how many bytes were written.
/// `W` is the write target.
#[derive(Debug)]
pub struct StatefulEncoder<W> {
    to: W,
    encoder: ElementEncoder,
    basic: BasicEncoder,
    bytes_written: u64,
}

impl<W> StatefulEncoder<W> {
    /// Create a new stateful encoder for the given transfer syntax.
    pub fn new(to: W, ts: &TransferSyntax) -> Self {
        Self::new_with(to, ts.encoder())
    }

    /// Create a new stateful encoder from a header encoder.
    pub fn new_with(to: W, encoder: ElementEncoder) -> Self {
        StatefulEncoder {
            to,
            basic: encoder.basic(),
            encoder,
            bytes_written: 0,
        }
    }

    /// Create a new stateful encoder for the file meta group,
    /// which is always in _Explicit VR Little Endian_.
    pub fn file_header_printer(to: W) -> Self {
        Self::new_with(to, ElementEncoder::ExplicitVR(ExplicitVREncoder::little_endian()))
    }

    /// The size of an element header with the given VR
    /// in this encoder's transfer syntax.
    pub fn header_length(&self, vr: VR) -> u32 {
        self.encoder.header_length(vr)
    }

    /// Whether value representations are written in element headers.
    pub fn is_explicit_vr(&self) -> bool {
        self.encoder.is_explicit_vr()
    }

    /// Retrieve the number of bytes written so far by this printer.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Recover the inner writer.
    pub fn into_inner(self) -> W {
        self.to
    }
}

impl<W> StatefulEncoder<W>
where
    W: Write,
{
    /// Encode and write a data element header.
    /// A defined length is rounded up to the next even number.
    pub fn encode_element_header(&mut self, mut de: DataElementHeader) -> Result<()> {
        if let Some(len) = de.len.get() {
            de.len = Length(even_len(len));
        }
        let bytes = self
            .encoder
            .encode_element_header(&mut self.to, de)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += bytes as u64;
        Ok(())
    }

    /// Encode and write an item header,
    /// where `len` is the specified length of the item
    /// (can be `0xFFFF_FFFF` for undefined length).
    pub fn encode_item_header(&mut self, len: u32) -> Result<()> {
        let len = if Length(len).is_undefined() {
            len
        } else {
            even_len(len)
        };
        self.encoder
            .encode_item_header(&mut self.to, len)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write an item delimiter.
    pub fn encode_item_delimiter(&mut self) -> Result<()> {
        self.encoder
            .encode_item_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write a sequence delimiter.
    pub fn encode_sequence_delimiter(&mut self) -> Result<()> {
        self.encoder
            .encode_sequence_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Write the given bytes directly to the inner writer,
    /// padding with a zero to an even number of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_raw(bytes)?;
        if bytes.len() % 2 != 0 {
            self.write_raw(&[0])?;
        }
        Ok(())
    }

    /// Write the values of a pixel data offset table as an item.
    pub fn encode_offset_table(&mut self, table: &[u32]) -> Result<()> {
        let mut bytes = Vec::with_capacity(table.len() * 4);
        for offset in table {
            self.basic
                .encode_ul(&mut bytes, *offset)
                .context(WriteValueDataSnafu {
                    position: self.bytes_written,
                })?;
        }
        self.encode_item_header(bytes.len() as u32)?;
        self.write_raw(&bytes)
    }

    /// Encode and write a data element with a primitive value.
    ///
    /// Text is encoded with the given character set where the value
    /// representation calls for it.
    /// The value is padded to an even number of bytes
    /// with the padding byte of its value representation,
    /// and the header declares the padded length.
    pub fn encode_primitive_element(
        &mut self,
        tag: Tag,
        vr: VR,
        value: &PrimitiveValue,
        charset: &SpecificCharacterSet,
    ) -> Result<()> {
        let mut bytes = value_bytes(self.basic, tag, vr, value, charset)?;
        if bytes.len() % 2 != 0 {
            bytes.push(vr.padding());
        }
        let len = match u32::try_from(bytes.len()) {
            Ok(len) if !Length(len).is_undefined() => Length(len),
            _ => {
                return ValueTooLargeSnafu {
                    tag,
                    len: bytes.len(),
                }
                .fail()
            }
        };
        self.encode_element_header(DataElementHeader::new(tag, vr, len))?;
        self.write_raw(&bytes)
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.to.write_all(bytes).context(WriteValueDataSnafu {
            position: self.bytes_written,
        })?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}

/// Calculate the encoded length of a primitive value, padding included,
/// without encoding it.
///
/// Returns `None` where the length cannot be known in advance:
/// text subject to a character set which is not byte for byte on ASCII,
/// text with other characters than ASCII,
/// or a value which does not fit the value representation.
pub fn value_length(
    tag: Tag,
    vr: VR,
    value: &PrimitiveValue,
    charset: &SpecificCharacterSet,
) -> Option<u32> {
    let kind = vr.descriptor().kind;
    let len = match (kind, value) {
        (_, PrimitiveValue::Empty) => 0,
        (ValueKind::Sequence, _) => return None,
        (_, PrimitiveValue::U8(bytes)) => bytes.len(),
        (ValueKind::Binary(bkind), v) => {
            if !binary_matches(bkind, v) {
                return None;
            }
            v.multiplicity() as usize * bkind.width() as usize
        }
        (ValueKind::Tags, PrimitiveValue::Tags(tags)) => tags.len() * 4,
        (ValueKind::Tags, _) => return None,
        (ValueKind::Text, _) if !charset.is_ascii_transparent() => return None,
        (_, v) => {
            let components = text_components(tag, vr, v).ok()?;
            if !components.iter().all(|c| c.is_ascii()) {
                return None;
            }
            components.iter().map(|c| c.len()).sum::<usize>() + components.len().saturating_sub(1)
        }
    };
    u32::try_from(len).ok().map(even_len)
}

/// Encode a primitive value into bytes, without padding.
fn value_bytes(
    basic: BasicEncoder,
    tag: Tag,
    vr: VR,
    value: &PrimitiveValue,
    charset: &SpecificCharacterSet,
) -> Result<Vec<u8>> {
    let kind = vr.descriptor().kind;
    match (kind, value) {
        (_, PrimitiveValue::Empty) => Ok(Vec::new()),
        (ValueKind::Sequence, v) => IncompatibleValueSnafu {
            tag,
            vr,
            value_type: v.value_type(),
        }
        .fail(),
        // raw bytes are written as they are, whatever the VR
        (_, PrimitiveValue::U8(bytes)) => Ok(bytes.to_vec()),
        (ValueKind::Binary(bkind), v) if binary_matches(bkind, v) => encode_binary(basic, v),
        (ValueKind::Tags, v @ PrimitiveValue::Tags(_)) => encode_binary(basic, v),
        (ValueKind::Binary(_), v) | (ValueKind::Tags, v) => IncompatibleValueSnafu {
            tag,
            vr,
            value_type: v.value_type(),
        }
        .fail(),
        (kind, v) => {
            let text = text_components(tag, vr, v)?.join("\\");
            let bytes = if kind == ValueKind::Text {
                charset.encode_text(&text, TextKind::for_vr(vr))
            } else {
                SpecificCharacterSet::Default.encode_text(&text, TextKind::Multi)
            };
            bytes.context(EncodeTextSnafu { tag })
        }
    }
}

fn encode_binary(basic: BasicEncoder, value: &PrimitiveValue) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    basic
        .encode_primitive(&mut bytes, value)
        .context(WriteValueDataSnafu { position: 0_u64 })?;
    Ok(bytes)
}

/// Whether a binary value holds numbers of the VR's binary kind.
fn binary_matches(kind: BinaryKind, value: &PrimitiveValue) -> bool {
    matches!(
        (kind, value),
        (BinaryKind::U8, PrimitiveValue::U8(_))
            | (BinaryKind::I16, PrimitiveValue::I16(_))
            | (BinaryKind::U16, PrimitiveValue::U16(_))
            | (BinaryKind::I32, PrimitiveValue::I32(_))
            | (BinaryKind::U32, PrimitiveValue::U32(_))
            | (BinaryKind::I64, PrimitiveValue::I64(_))
            | (BinaryKind::U64, PrimitiveValue::U64(_))
            | (BinaryKind::F32, PrimitiveValue::F32(_))
            | (BinaryKind::F64, PrimitiveValue::F64(_))
    )
}

/// The text components of a value written in a textual VR.
///
/// Numbers are accepted for decimal strings (floats)
/// and integer strings (integers),
/// in which case they are formatted in a culture-invariant way.
fn text_components<'a>(tag: Tag, vr: VR, value: &'a PrimitiveValue) -> Result<Cow<'a, [String]>> {
    let kind = vr.descriptor().kind;
    let compatible = match value {
        PrimitiveValue::Str(_) | PrimitiveValue::Strs(_) => true,
        PrimitiveValue::F32(_) | PrimitiveValue::F64(_) => kind == ValueKind::Decimal,
        PrimitiveValue::I16(_)
        | PrimitiveValue::U16(_)
        | PrimitiveValue::I32(_)
        | PrimitiveValue::U32(_)
        | PrimitiveValue::I64(_)
        | PrimitiveValue::U64(_) => kind == ValueKind::Integer,
        _ => false,
    };
    ensure!(
        compatible,
        IncompatibleValueSnafu {
            tag,
            vr,
            value_type: value.value_type(),
        }
    );

    let non_finite = match value {
        PrimitiveValue::F32(v) => v.iter().map(|x| f64::from(*x)).find(|x| !x.is_finite()),
        PrimitiveValue::F64(v) => v.iter().copied().find(|x| !x.is_finite()),
        _ => None,
    };
    if let Some(value) = non_finite {
        return NonFiniteDecimalSnafu { tag, value }.fail();
    }

    let components = value.to_multi_str();
    if !vr.is_single_valued() {
        if let Some(component) = components.iter().find(|c| c.contains('\\')) {
            return BackslashInComponentSnafu {
                tag,
                component: component.as_str(),
            }
            .fail();
        }
    }
    if let Some(max) = vr.descriptor().max_component_length {
        let too_long = components
            .iter()
            .find(|c| c.chars().count() > max as usize);
        if let Some(component) = too_long {
            return ComponentTooLongSnafu {
                tag,
                vr,
                component: component.as_str(),
                max,
            }
            .fail();
        }
    }
    Ok(components)
}

fn even_len(l: u32) -> u32 {
    l.saturating_add(1) & !1
}

#[cfg(test)]
mod tests {
    use super::{value_length, StatefulEncoder};
    use dcmio_core::{dcm_value, PrimitiveValue, Tag, VR};
    use dcmio_encoding::text::SpecificCharacterSet;
    use dcmio_encoding::transfer_syntax::{EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN};

    fn encode_explicit(tag: Tag, vr: VR, value: &PrimitiveValue) -> Vec<u8> {
        let mut out = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN);
        encoder
            .encode_primitive_element(tag, vr, value, &SpecificCharacterSet::Default)
            .unwrap();
        assert_eq!(encoder.bytes_written(), out.len() as u64);
        out
    }

    /// Odd lengthed values are padded with a space (PN)
    #[test]
    fn encode_odd_length_element_pn() {
        let out = encode_explicit(Tag(0x0010, 0x0010), VR::PN, &dcm_value!(Strs, ["Dall^John"]));
        assert_eq!(
            &out,
            &[
                0x10, 0x00, 0x10, 0x00, // tag
                b'P', b'N', // VR
                0x0A, 0x00, // length
                // ---------- value ----------
                b'D', b'a', b'l', b'l', b'^', b'J', b'o', b'h', b'n', b' ',
            ],
        )
    }

    /// Odd lengthed values are padded with a zero (bytes)
    #[test]
    fn encode_odd_length_element_bytes() {
        let out = encode_explicit(Tag(0x7FE0, 0x0010), VR::OB, &vec![1; 9].into());
        assert_eq!(
            &out,
            &[
                0xE0, 0x7F, 0x10, 0x00, // tag
                b'O', b'B', // VR
                0x00, 0x00, // reserved
                0x0A, 0x00, 0x00, 0x00, // length
                // ---------- value ----------
                1, 1, 1, 1, 1, 1, 1, 1, 1, 0,
            ],
        )
    }

    /// Odd lengthed UIDs are padded with a null character
    #[test]
    fn encode_odd_length_element_uid() {
        let out = encode_explicit(Tag(0x0002, 0x0010), VR::UI, &dcm_value!(Strs, ["1.2.840.10008.1.2"]));
        #[rustfmt::skip]
        let expected: &[u8] = &[
            0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x12, 0x00,
            b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8',
            b'.', b'1', b'.', b'2', 0x00,
        ];
        assert_eq!(&out, expected);
    }

    #[test]
    fn encode_decimal_and_integer_strings() {
        let out = encode_explicit(Tag(0x0028, 0x0030), VR::DS, &dcm_value!(F64, [0.5, 1e-7]));
        assert_eq!(&out[8..], b"0.5\\1E-07 ");

        let out = encode_explicit(Tag(0x0020, 0x0013), VR::IS, &dcm_value!(I32, [-12]));
        assert_eq!(&out[8..], b"-12 ");
    }

    #[test]
    fn implicit_vr_header_is_eight_bytes() {
        let mut out = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, &IMPLICIT_VR_LITTLE_ENDIAN);
        encoder
            .encode_primitive_element(
                Tag(0x0028, 0x0010),
                VR::US,
                &dcm_value!(U16, [512]),
                &SpecificCharacterSet::Default,
            )
            .unwrap();
        assert_eq!(
            &out,
            &[0x28, 0x00, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x02]
        );
    }

    #[test]
    fn backslash_in_component_is_rejected() {
        let mut out = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN);
        let err = encoder
            .encode_primitive_element(
                Tag(0x0008, 0x0008),
                VR::CS,
                &dcm_value!(Strs, ["ORIGINAL\\PRIMARY"]),
                &SpecificCharacterSet::Default,
            )
            .unwrap_err();
        assert!(matches!(err, super::Error::BackslashInComponent { .. }));
        assert_eq!(encoder.bytes_written(), 0);

        // single valued text takes backslashes as they are
        let out = encode_explicit(
            Tag(0x0020, 0x4000),
            VR::LT,
            &PrimitiveValue::Str("a\\b".to_string()),
        );
        assert_eq!(&out[8..], b"a\\b ");
    }

    #[test]
    fn component_length_is_capped() {
        let mut out = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN);
        let err = encoder
            .encode_primitive_element(
                Tag(0x0008, 0x0060),
                VR::CS,
                &dcm_value!(Strs, ["MR", "ABCDEFGHIJKLMNOPQ"]),
                &SpecificCharacterSet::Default,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            super::Error::ComponentTooLong { max: 16, vr: VR::CS, .. }
        ));
        assert_eq!(encoder.bytes_written(), 0);

        // the cap counts characters, not encoded bytes
        let latin1 = SpecificCharacterSet::from_code("ISO_IR 100").unwrap();
        let mut out = Vec::new();
        StatefulEncoder::new(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN)
            .encode_primitive_element(
                Tag(0x0008, 0x1030),
                VR::LO,
                &dcm_value!(Strs, ["é".repeat(64)]),
                &latin1,
            )
            .unwrap();
        assert_eq!(out.len(), 8 + 64);

        let err = StatefulEncoder::new(Vec::new(), &EXPLICIT_VR_LITTLE_ENDIAN)
            .encode_primitive_element(
                Tag(0x0020, 0x0013),
                VR::IS,
                &dcm_value!(I64, [i64::MIN]),
                &SpecificCharacterSet::Default,
            )
            .unwrap_err();
        assert!(matches!(err, super::Error::ComponentTooLong { max: 12, .. }));
    }

    #[test]
    fn mismatched_value_types_are_rejected() {
        let mut out = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN);
        let cs = SpecificCharacterSet::Default;
        assert!(encoder
            .encode_primitive_element(Tag(0x0028, 0x0010), VR::US, &dcm_value!(I32, [1]), &cs)
            .is_err());
        assert!(encoder
            .encode_primitive_element(Tag(0x0020, 0x0013), VR::IS, &dcm_value!(F64, [1.5]), &cs)
            .is_err());
        assert!(encoder
            .encode_primitive_element(
                Tag(0x0028, 0x0030),
                VR::DS,
                &dcm_value!(F64, [f64::NAN]),
                &cs
            )
            .is_err());
    }

    #[test]
    fn value_length_matches_encoding() {
        let cs = SpecificCharacterSet::Default;
        let cases = vec![
            (Tag(0x0010, 0x0010), VR::PN, dcm_value!(Strs, ["Dall^John"])),
            (Tag(0x0008, 0x0008), VR::CS, dcm_value!(Strs, ["ORIGINAL", "PRIMARY"])),
            (Tag(0x0028, 0x0010), VR::US, dcm_value!(U16, [512, 256, 1])),
            (Tag(0x0028, 0x0030), VR::DS, dcm_value!(F64, [0.5, 0.333])),
            (Tag(0x0020, 0x0013), VR::IS, dcm_value!(I64, [7])),
            (Tag(0x0028, 0x0009), VR::AT, dcm_value!(Tags, [Tag(0x0018, 0x1063)])),
            (Tag(0x7FE0, 0x0010), VR::OB, dcm_value!(U8, [1, 2, 3])),
            (Tag(0x0010, 0x4000), VR::LT, PrimitiveValue::Empty),
        ];
        for (tag, vr, value) in cases {
            let out = encode_explicit(tag, vr, &value);
            let header_len = if vr == VR::OB { 12 } else { 8 };
            assert_eq!(
                value_length(tag, vr, &value, &cs),
                Some((out.len() - header_len) as u32),
                "{} {}",
                tag,
                vr
            );
        }
    }

    #[test]
    fn value_length_unknown_for_non_ascii_text() {
        let cs = SpecificCharacterSet::from_code("ISO_IR 192").unwrap();
        let tag = Tag(0x0010, 0x0010);
        assert_eq!(
            value_length(tag, VR::PN, &dcm_value!(Strs, ["Wang^XiaoDong=王^小東="]), &cs),
            None
        );
        assert_eq!(
            value_length(tag, VR::PN, &dcm_value!(Strs, ["Wang^XiaoDong"]), &cs),
            Some(14)
        );
    }
}
