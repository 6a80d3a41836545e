//! Encoding and decoding of text in DICOM data sets,
//! according to the _Specific Character Set_ (0008,0005) in effect.
//!
//! The character repertoires supported are:
//! - ISO 646 (the default repertoire)
//! - the ISO 8859 family: Latin 1 to 5 and 9, Cyrillic, Arabic, Greek, Hebrew
//! - TIS 620-2533, Thai
//! - JIS X 0201, JIS X 0208 and JIS X 0212, Japanese
//! - KS X 1001, Korean
//! - GB 2312 and GB 18030, Chinese
//! - ISO 10646 in UTF-8
//!
//! Character sets without code extensions decode the whole value directly.
//! Those with code extensions go through the [`iso2022`] decoder.
//!
//! [`iso2022`]: ./iso2022/index.html

use self::iso2022::{CharacterSet, DefinedTerm, Iso2022, DEFINED_TERMS};
use dcmio_core::VR;
use encoding::all::{GB18030, ISO_8859_1, UTF_8};
use encoding::{DecoderTrap, EncoderTrap, Encoding, EncodingRef};
use snafu::{Backtrace, Snafu};
use std::borrow::Cow;

pub mod iso2022;

/// An error type for text encoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum EncodeTextError {
    /// A custom error message,
    /// for when the underlying error type does not encode error semantics
    /// into type variants.
    #[snafu(display("{}", message))]
    EncodeCustom {
        /// The error message in plain text.
        message: Cow<'static, str>,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The character cannot be represented in any of the
    /// declared character sets.
    #[snafu(display("Character {:?} cannot be encoded in {}", character, charset))]
    Unrepresentable {
        character: char,
        charset: String,
        backtrace: Backtrace,
    },
}

/// An error type for text decoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum DecodeTextError {
    /// A custom error message,
    /// for when the underlying error type does not encode error semantics
    /// into type variants.
    #[snafu(display("{}", message))]
    DecodeCustom {
        /// The error message in plain text.
        message: Cow<'static, str>,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// An escape sequence matched none of the declared character sets.
    #[snafu(display("Unknown escape sequence {:02X?} at position {}", sequence, position))]
    UnknownEscapeSequence {
        position: usize,
        sequence: Vec<u8>,
        backtrace: Backtrace,
    },
}

/// An error type for resolving the character set
/// from the values of _Specific Character Set_.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum CharacterSetError {
    /// A value did not name a supported character set.
    #[snafu(display("Unsupported specific character set {:?}", term))]
    UnsupportedCharacterSet { term: String, backtrace: Backtrace },
}

impl CharacterSetError {
    /// The offending defined term.
    pub fn term(&self) -> &str {
        match self {
            CharacterSetError::UnsupportedCharacterSet { term, .. } => term.as_str(),
        }
    }
}

type EncodeResult<T> = Result<T, EncodeTextError>;
type DecodeResult<T> = Result<T, DecodeTextError>;

/// Which delimiters split a text value,
/// which depends on its value representation.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum TextKind {
    /// Multi-valued text, separated by backslashes.
    Multi,
    /// Person names: values separated by backslashes,
    /// component groups by `=` and components by `^`.
    PersonName,
    /// Single-valued text (LT, ST, UT), without delimiters.
    Single,
}

impl TextKind {
    /// The kind of text held by the given VR.
    pub fn for_vr(vr: VR) -> Self {
        match vr {
            VR::PN => TextKind::PersonName,
            VR::LT | VR::ST | VR::UT => TextKind::Single,
            _ => TextKind::Multi,
        }
    }

    /// Whether the byte is a delimiter in this kind of text.
    pub fn is_delimiter(self, b: u8) -> bool {
        match self {
            TextKind::Multi => b == b'\\',
            TextKind::PersonName => matches!(b, b'\\' | b'^' | b'='),
            TextKind::Single => false,
        }
    }
}

/// A holder of encoding and decoding mechanisms for text in DICOM content,
/// which according to the standard, depends on the specific character set.
pub trait TextCodec {
    /// Obtain the defined term (unique name) of the text encoding,
    /// which may be used as the value of a
    /// Specific Character Set (0008, 0005) element to refer to this codec.
    ///
    /// Should contain no leading or trailing spaces.
    fn name(&self) -> &'static str;

    /// Decode the given byte buffer as a single string. The resulting string
    /// _may_ contain backslash characters ('\') to delimit individual values,
    /// and should be split later on if required.
    fn decode(&self, text: &[u8]) -> DecodeResult<String>;

    /// Encode a text value into a byte vector. The input string can
    /// feature multiple text values by using the backslash character ('\')
    /// as the value delimiter.
    fn encode(&self, text: &str) -> EncodeResult<Vec<u8>>;
}

impl<'a, T: ?Sized> TextCodec for &'a T
where
    T: TextCodec,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(&self, text: &[u8]) -> DecodeResult<String> {
        (**self).decode(text)
    }

    fn encode(&self, text: &str) -> EncodeResult<Vec<u8>> {
        (**self).encode(text)
    }
}

/// The character set in effect for text values,
/// resolved from the values of _Specific Character Set_.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SpecificCharacterSet {
    /// **ISO-IR 6**: the default character set.
    Default,
    /// One of the single-byte character sets without code extensions,
    /// such as **ISO-IR 100** (Latin alphabet No. 1)
    /// or **ISO-IR 13** (JIS X 0201).
    Single(CharacterSet),
    /// **ISO-IR 192**: The Unicode character set based on the UTF-8 encoding.
    IsoIr192,
    /// **GB18030**: The Simplified Chinese character set.
    /// Also used for **GBK**, which it is a superset of.
    Gb18030,
    /// Character sets switched through ISO 2022 escape sequences.
    Iso2022(Iso2022),
}

impl Default for SpecificCharacterSet {
    fn default() -> Self {
        SpecificCharacterSet::Default
    }
}

/// Reduce a defined term to a comparable key,
/// tolerating the usual misspellings.
fn normalize_term(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn lookup_term(term: &str, first: bool) -> Option<&'static DefinedTerm> {
    let key = normalize_term(term);
    if key.is_empty() {
        // only the first value may be empty
        return if first {
            DEFINED_TERMS.iter().find(|t| t.iso2022.is_empty())
        } else {
            None
        };
    }
    DEFINED_TERMS.iter().find(|t| {
        !t.iso2022.is_empty()
            && (normalize_term(t.iso2022) == key
                || t.single.map(normalize_term).as_deref() == Some(&key[..]))
    })
}

impl SpecificCharacterSet {
    /// Obtain the specific character set identified by a single defined term.
    ///
    /// # Example
    ///
    /// ```
    /// # use dcmio_encoding::text::{SpecificCharacterSet, TextCodec};
    /// let character_set = SpecificCharacterSet::from_code("ISO_IR 100").unwrap();
    /// assert_eq!(character_set.name(), "ISO_IR 100");
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_values(&[code]).ok()
    }

    /// Resolve the character set from all values of
    /// _Specific Character Set_.
    ///
    /// No values, or a single empty value, denote the default repertoire.
    /// More than one value enables code extensions:
    /// the first value gives the initial designations
    /// and may be empty for ISO-IR 6.
    pub fn from_values<S: AsRef<str>>(
        values: &[S],
    ) -> Result<Self, CharacterSetError> {
        let values: Vec<&str> = values.iter().map(|v| v.as_ref().trim()).collect();

        match values.as_slice() {
            [] => Ok(SpecificCharacterSet::Default),
            [single] => Self::from_single_value(single),
            [first, ..] => {
                if let Some(cs) = Self::without_code_extensions(first) {
                    tracing::warn!(
                        "{} does not admit code extensions, ignoring further values",
                        first
                    );
                    return Ok(cs);
                }
                let mut terms = Vec::with_capacity(values.len());
                for (i, value) in values.iter().enumerate() {
                    let term = lookup_term(value, i == 0).ok_or_else(|| {
                        UnsupportedCharacterSetSnafu {
                            term: value.to_string(),
                        }
                        .build()
                    })?;
                    terms.push(term);
                }
                Ok(SpecificCharacterSet::Iso2022(Iso2022::from_terms(&terms)))
            }
        }
    }

    fn without_code_extensions(value: &str) -> Option<Self> {
        match normalize_term(value).as_str() {
            "ISOIR192" => Some(SpecificCharacterSet::IsoIr192),
            "GB18030" | "GBK" => Some(SpecificCharacterSet::Gb18030),
            _ => None,
        }
    }

    fn from_single_value(value: &str) -> Result<Self, CharacterSetError> {
        if let Some(cs) = Self::without_code_extensions(value) {
            return Ok(cs);
        }
        let key = normalize_term(value);
        if key.is_empty() || key == "DEFAULT" {
            return Ok(SpecificCharacterSet::Default);
        }
        let term = lookup_term(value, true).ok_or_else(|| {
            UnsupportedCharacterSetSnafu {
                term: value.to_string(),
            }
            .build()
        })?;

        let is_code_extension = term.single.map(normalize_term).as_deref() != Some(&key[..]);
        match term.sets {
            _ if is_code_extension => Ok(SpecificCharacterSet::Iso2022(Iso2022::from_terms(&[
                term,
            ]))),
            [CharacterSet::IsoIr6] => Ok(SpecificCharacterSet::Default),
            [set, ..] => Ok(SpecificCharacterSet::Single(*set)),
            [] => UnsupportedCharacterSetSnafu {
                term: value.to_string(),
            }
            .fail(),
        }
    }

    /// The defined terms to write as the value of
    /// _Specific Character Set_ for this character set.
    pub fn defined_terms(&self) -> Vec<&'static str> {
        match self {
            SpecificCharacterSet::Iso2022(e) => e.defined_terms().to_vec(),
            cs => vec![cs.name()],
        }
    }

    /// Whether text consisting only of ASCII characters
    /// is encoded byte for byte.
    /// When so, the encoded length of such text is known in advance.
    pub fn is_ascii_transparent(&self) -> bool {
        match self {
            SpecificCharacterSet::Single(CharacterSet::IsoIr13) => false,
            SpecificCharacterSet::Iso2022(e) => e.initial_g0() == CharacterSet::IsoIr6,
            _ => true,
        }
    }

    /// Decode text, splitting runs at the delimiters of the given kind.
    pub fn decode_text(&self, text: &[u8], kind: TextKind) -> DecodeResult<String> {
        match self {
            SpecificCharacterSet::Default => decode_with(ISO_8859_1, text),
            SpecificCharacterSet::Single(set) => decode_with(set.encoding(), text),
            SpecificCharacterSet::IsoIr192 => decode_with(UTF_8, text),
            SpecificCharacterSet::Gb18030 => decode_with(GB18030, text),
            SpecificCharacterSet::Iso2022(e) => e.decode(text, kind),
        }
    }

    /// Encode text of the given kind.
    pub fn encode_text(&self, text: &str, kind: TextKind) -> EncodeResult<Vec<u8>> {
        match self {
            SpecificCharacterSet::Default => encode_with(ISO_8859_1, text),
            SpecificCharacterSet::Single(set) => encode_with(set.encoding(), text),
            SpecificCharacterSet::IsoIr192 => encode_with(UTF_8, text),
            SpecificCharacterSet::Gb18030 => encode_with(GB18030, text),
            SpecificCharacterSet::Iso2022(e) => e.encode(text, kind),
        }
    }
}

impl TextCodec for SpecificCharacterSet {
    fn name(&self) -> &'static str {
        match self {
            SpecificCharacterSet::Default => "ISO_IR 6",
            SpecificCharacterSet::Single(set) => DEFINED_TERMS
                .iter()
                .find(|t| t.sets.first() == Some(set))
                .and_then(|t| t.single)
                .unwrap_or("ISO_IR 6"),
            SpecificCharacterSet::IsoIr192 => "ISO_IR 192",
            SpecificCharacterSet::Gb18030 => "GB18030",
            SpecificCharacterSet::Iso2022(e) => e
                .defined_terms()
                .iter()
                .copied()
                .find(|t| !t.is_empty())
                .unwrap_or("ISO 2022 IR 6"),
        }
    }

    fn decode(&self, text: &[u8]) -> DecodeResult<String> {
        self.decode_text(text, TextKind::Multi)
    }

    fn encode(&self, text: &str) -> EncodeResult<Vec<u8>> {
        self.encode_text(text, TextKind::Multi)
    }
}

fn decode_with(encoding: EncodingRef, text: &[u8]) -> DecodeResult<String> {
    encoding
        .decode(text, DecoderTrap::Replace)
        .map_err(|message| DecodeCustomSnafu { message }.build())
}

fn encode_with(encoding: EncodingRef, text: &str) -> EncodeResult<Vec<u8>> {
    encoding
        .encode(text, EncoderTrap::Strict)
        .map_err(|message| EncodeCustomSnafu { message }.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec<T>(codec: T, string: &str, bytes: &[u8])
    where
        T: TextCodec,
    {
        assert_eq!(codec.encode(string).expect("encoding"), bytes);
        assert_eq!(codec.decode(bytes).expect("decoding"), string);
    }

    #[test]
    fn resolve_defined_terms() {
        let none: [&str; 0] = [];
        assert_eq!(
            SpecificCharacterSet::from_values(&none).unwrap(),
            SpecificCharacterSet::Default
        );
        assert_eq!(
            SpecificCharacterSet::from_values(&[""]).unwrap(),
            SpecificCharacterSet::Default
        );
        assert_eq!(
            SpecificCharacterSet::from_values(&["ISO_IR 100"]).unwrap(),
            SpecificCharacterSet::Single(CharacterSet::IsoIr100)
        );
        assert_eq!(
            SpecificCharacterSet::from_values(&["ISO_IR_144 "]).unwrap(),
            SpecificCharacterSet::Single(CharacterSet::IsoIr144)
        );
        assert_eq!(
            SpecificCharacterSet::from_values(&["GBK"]).unwrap(),
            SpecificCharacterSet::Gb18030
        );
        assert!(matches!(
            SpecificCharacterSet::from_values(&["ISO 2022 IR 100"]).unwrap(),
            SpecificCharacterSet::Iso2022(_)
        ));

        let cs = SpecificCharacterSet::from_values(&["", "ISO 2022 IR 87"]).unwrap();
        assert_eq!(cs.defined_terms(), vec!["", "ISO 2022 IR 87"]);
        assert_eq!(cs.name(), "ISO 2022 IR 87");

        let err = SpecificCharacterSet::from_values(&["ISO_IR 999"]).unwrap_err();
        assert_eq!(err.term(), "ISO_IR 999");
        assert!(SpecificCharacterSet::from_values(&["", ""]).is_err());
    }

    #[test]
    fn iso_ir_6_baseline() {
        let codec = SpecificCharacterSet::Default;
        test_codec(&codec, "Smith^John", b"Smith^John");
    }

    #[test]
    fn iso_ir_192_baseline() {
        let codec = SpecificCharacterSet::IsoIr192;
        test_codec(&codec, "Simões^John", "Simões^John".as_bytes());
        test_codec(
            codec,
            "Wang^XiaoDong=王^小東=",
            "Wang^XiaoDong=王^小東=".as_bytes(),
        );
    }

    #[test]
    fn iso_ir_100_baseline() {
        let codec = SpecificCharacterSet::Single(CharacterSet::IsoIr100);
        test_codec(&codec, "Simões^João", b"Sim\xF5es^Jo\xE3o");
        test_codec(codec, "Günther^Hans", b"G\xfcnther^Hans");
    }

    #[test]
    fn iso_ir_144_baseline() {
        let codec = SpecificCharacterSet::Single(CharacterSet::IsoIr144);
        test_codec(
            codec,
            "Иванков^Андрей",
            b"\xb8\xd2\xd0\xdd\xda\xde\xd2^\xb0\xdd\xd4\xe0\xd5\xd9",
        );
    }

    #[test]
    fn gb18030_baseline() {
        let codec = SpecificCharacterSet::Gb18030;
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            b'W', b'a', b'n', b'g', b'^', b'X', b'i', b'a', b'o', b'D', b'o', b'n', b'g', b'=',
            0xCD, 0xF5, b'^', 0xD0, 0xA1, 0xB6, 0xAB, b'=',
        ];
        test_codec(codec, "Wang^XiaoDong=王^小东=", bytes);
    }

    #[test]
    fn unrepresentable_characters_fail() {
        let codec = SpecificCharacterSet::Single(CharacterSet::IsoIr100);
        assert!(codec.encode("王").is_err());
        let codec = SpecificCharacterSet::from_values(&["ISO 2022 IR 100"]).unwrap();
        assert!(matches!(
            codec.encode_text("王", TextKind::PersonName),
            Err(EncodeTextError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn ascii_transparency() {
        assert!(SpecificCharacterSet::Default.is_ascii_transparent());
        assert!(SpecificCharacterSet::from_values(&["", "ISO 2022 IR 87"])
            .unwrap()
            .is_ascii_transparent());
        assert!(!SpecificCharacterSet::from_values(&["ISO_IR 13"])
            .unwrap()
            .is_ascii_transparent());
    }
}
