//! Character sets reachable through ISO 2022 code extension techniques,
//! and the escape sequence driven decoder and encoder over them.
//!
//! A data set declaring more than one value in
//! _Specific Character Set_ (0008,0005),
//! or a single `ISO 2022 IR nnn` defined term,
//! may switch character sets in the middle of a value.
//! An escape sequence designates a character set
//! into either the G0 (bytes below 0x80) or the G1 (bytes from 0x80)
//! code element.
//! Runs of bytes under the same character set are decoded together,
//! then normalized to NFKC.
//!
//! Delimiters are only recognized while the active G0 set is single-byte,
//! so that the second byte of a multi-byte character is never taken
//! for one.
//! After a backslash the designations return to their initial state.

use super::{DecodeResult, EncodeResult, TextKind, UnknownEscapeSequenceSnafu, UnrepresentableSnafu};
use encoding::all::{
    ASCII, EUC_JP, GB18030, ISO_8859_1, ISO_8859_15, ISO_8859_2, ISO_8859_3, ISO_8859_4,
    ISO_8859_5, ISO_8859_6, ISO_8859_7, ISO_8859_8, WINDOWS_1254, WINDOWS_31J, WINDOWS_874,
    WINDOWS_949,
};
use encoding::{DecoderTrap, EncoderTrap, Encoding, EncodingRef};
use unicode_normalization::UnicodeNormalization;

const ESC: u8 = 0x1B;

/// The code element a character set is designated to.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum CodeElement {
    /// Bytes in the range 0x00 to 0x7F.
    G0,
    /// Bytes in the range 0x80 to 0xFF.
    G1,
}

/// A character set which may be designated by an escape sequence.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum CharacterSet {
    /// ISO-IR 6: ASCII
    IsoIr6,
    /// ISO-IR 100: Latin alphabet No. 1
    IsoIr100,
    /// ISO-IR 101: Latin alphabet No. 2
    IsoIr101,
    /// ISO-IR 109: Latin alphabet No. 3
    IsoIr109,
    /// ISO-IR 110: Latin alphabet No. 4
    IsoIr110,
    /// ISO-IR 144: Cyrillic
    IsoIr144,
    /// ISO-IR 127: Arabic
    IsoIr127,
    /// ISO-IR 126: Greek
    IsoIr126,
    /// ISO-IR 138: Hebrew
    IsoIr138,
    /// ISO-IR 148: Latin alphabet No. 5
    IsoIr148,
    /// ISO-IR 203: Latin alphabet No. 9
    IsoIr203,
    /// ISO-IR 166: TIS 620-2533, Thai
    IsoIr166,
    /// ISO-IR 13: JIS X 0201 Katakana
    IsoIr13,
    /// ISO-IR 14: JIS X 0201 Romaji
    IsoIr14,
    /// ISO-IR 87: JIS X 0208, Kanji
    IsoIr87,
    /// ISO-IR 159: JIS X 0212, supplementary Kanji
    IsoIr159,
    /// ISO-IR 149: KS X 1001, Hangul and Hanja
    IsoIr149,
    /// ISO-IR 58: GB 2312, Simplified Chinese
    IsoIr58,
}

use self::CharacterSet::*;

/// All the character sets known to the decoder.
pub const ALL_CHARACTER_SETS: [CharacterSet; 18] = [
    IsoIr6, IsoIr100, IsoIr101, IsoIr109, IsoIr110, IsoIr144, IsoIr127, IsoIr126, IsoIr138,
    IsoIr148, IsoIr203, IsoIr166, IsoIr13, IsoIr14, IsoIr87, IsoIr159, IsoIr149, IsoIr58,
];

impl CharacterSet {
    /// The ISO registration number.
    pub fn iso_ir(self) -> u16 {
        match self {
            IsoIr6 => 6,
            IsoIr100 => 100,
            IsoIr101 => 101,
            IsoIr109 => 109,
            IsoIr110 => 110,
            IsoIr144 => 144,
            IsoIr127 => 127,
            IsoIr126 => 126,
            IsoIr138 => 138,
            IsoIr148 => 148,
            IsoIr203 => 203,
            IsoIr166 => 166,
            IsoIr13 => 13,
            IsoIr14 => 14,
            IsoIr87 => 87,
            IsoIr159 => 159,
            IsoIr149 => 149,
            IsoIr58 => 58,
        }
    }

    /// The code element this set is designated to.
    pub fn code_element(self) -> CodeElement {
        match self {
            IsoIr6 | IsoIr14 | IsoIr87 | IsoIr159 => CodeElement::G0,
            _ => CodeElement::G1,
        }
    }

    /// Whether characters take two bytes.
    pub fn is_multi_byte(self) -> bool {
        matches!(self, IsoIr87 | IsoIr159 | IsoIr149 | IsoIr58)
    }

    /// The escape sequence designating this set, without the leading ESC.
    pub fn escape_sequence(self) -> &'static [u8] {
        match self {
            IsoIr6 => b"(B",
            IsoIr100 => b"-A",
            IsoIr101 => b"-B",
            IsoIr109 => b"-C",
            IsoIr110 => b"-D",
            IsoIr144 => b"-L",
            IsoIr127 => b"-G",
            IsoIr126 => b"-F",
            IsoIr138 => b"-H",
            IsoIr148 => b"-M",
            IsoIr203 => b"-b",
            IsoIr166 => b"-T",
            IsoIr13 => b")I",
            IsoIr14 => b"(J",
            IsoIr87 => b"$B",
            IsoIr159 => b"$(D",
            IsoIr149 => b"$)C",
            IsoIr58 => b"$)A",
        }
    }

    /// The text encoding of the full byte range
    /// in which this set occupies its code element.
    pub(crate) fn encoding(self) -> EncodingRef {
        match self {
            IsoIr6 | IsoIr14 => ASCII,
            IsoIr100 => ISO_8859_1,
            IsoIr101 => ISO_8859_2,
            IsoIr109 => ISO_8859_3,
            IsoIr110 => ISO_8859_4,
            IsoIr144 => ISO_8859_5,
            IsoIr127 => ISO_8859_6,
            IsoIr126 => ISO_8859_7,
            IsoIr138 => ISO_8859_8,
            // ISO 8859-9 is only known to the encoding crate as its superset
            IsoIr148 => WINDOWS_1254,
            IsoIr203 => ISO_8859_15,
            IsoIr166 => WINDOWS_874,
            IsoIr13 => WINDOWS_31J,
            IsoIr87 | IsoIr159 => EUC_JP,
            IsoIr149 => WINDOWS_949,
            IsoIr58 => GB18030,
        }
    }

    /// Decode a run of bytes all designated to this set.
    fn decode_run(self, bytes: &[u8]) -> String {
        match self {
            IsoIr6 => bytes.iter().map(|&b| char::from(b)).collect(),
            IsoIr14 => bytes
                .iter()
                .map(|&b| match b {
                    0x5C => '\u{A5}',
                    0x7E => '\u{203E}',
                    b => char::from(b),
                })
                .collect(),
            // JIS X 0208 in G0 is EUC-JP without the high bits
            IsoIr87 => {
                let high: Vec<u8> = bytes.iter().map(|b| b | 0x80).collect();
                decode_replacing(EUC_JP, &high)
            }
            // JIS X 0212 is the third code set of EUC-JP
            IsoIr159 => {
                let mut high = Vec::with_capacity(bytes.len() / 2 * 3 + 1);
                for pair in bytes.chunks(2) {
                    high.push(0x8F);
                    high.extend(pair.iter().map(|b| b | 0x80));
                }
                decode_replacing(EUC_JP, &high)
            }
            _ => decode_replacing(self.encoding(), bytes),
        }
    }

    /// Encode a single character in this set, if representable.
    /// Multi-byte sets in G0 are written without the high bits.
    fn encode_char(self, c: char) -> Option<Vec<u8>> {
        match self {
            IsoIr6 => {
                if c.is_ascii() {
                    Some(vec![c as u8])
                } else {
                    None
                }
            }
            IsoIr14 => match c {
                '\u{A5}' => Some(vec![0x5C]),
                '\u{203E}' => Some(vec![0x7E]),
                '\\' | '~' => None,
                c if c.is_ascii() => Some(vec![c as u8]),
                _ => None,
            },
            // no encoder of JIS X 0212 is available
            IsoIr159 => None,
            IsoIr87 => encode_strict(EUC_JP, c)
                .filter(|bytes| matches!(bytes[..], [b0, b1] if b0 >= 0xA1 && b1 >= 0xA1))
                .map(|bytes| bytes.iter().map(|b| b & 0x7F).collect()),
            IsoIr149 | IsoIr58 => encode_strict(self.encoding(), c).filter(|bytes| {
                matches!(bytes[..], [b0, b1]
                    if (0xA1..=0xFE).contains(&b0) && (0xA1..=0xFE).contains(&b1))
            }),
            IsoIr13 => encode_strict(WINDOWS_31J, c)
                .filter(|bytes| matches!(bytes[..], [b] if (0xA1..=0xDF).contains(&b))),
            _ => encode_strict(self.encoding(), c)
                .filter(|bytes| matches!(bytes[..], [b] if b >= 0xA0)),
        }
    }
}

fn decode_replacing(encoding: EncodingRef, bytes: &[u8]) -> String {
    encoding
        .decode(bytes, DecoderTrap::Replace)
        .unwrap_or_else(|_| "\u{FFFD}".repeat(bytes.len()))
}

fn encode_strict(encoding: EncodingRef, c: char) -> Option<Vec<u8>> {
    let mut buf = [0u8; 4];
    encoding
        .encode(c.encode_utf8(&mut buf), EncoderTrap::Strict)
        .ok()
}

/// A defined term of _Specific Character Set_
/// and the character sets it brings in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct DefinedTerm {
    /// The term without code extensions, if one exists.
    pub single: Option<&'static str>,
    /// The term with code extensions.
    pub iso2022: &'static str,
    pub sets: &'static [CharacterSet],
}

pub(crate) static DEFINED_TERMS: [DefinedTerm; 18] = [
    DefinedTerm { single: Some("ISO_IR 6"), iso2022: "ISO 2022 IR 6", sets: &[IsoIr6] },
    DefinedTerm { single: Some("ISO_IR 100"), iso2022: "ISO 2022 IR 100", sets: &[IsoIr100] },
    DefinedTerm { single: Some("ISO_IR 101"), iso2022: "ISO 2022 IR 101", sets: &[IsoIr101] },
    DefinedTerm { single: Some("ISO_IR 109"), iso2022: "ISO 2022 IR 109", sets: &[IsoIr109] },
    DefinedTerm { single: Some("ISO_IR 110"), iso2022: "ISO 2022 IR 110", sets: &[IsoIr110] },
    DefinedTerm { single: Some("ISO_IR 144"), iso2022: "ISO 2022 IR 144", sets: &[IsoIr144] },
    DefinedTerm { single: Some("ISO_IR 127"), iso2022: "ISO 2022 IR 127", sets: &[IsoIr127] },
    DefinedTerm { single: Some("ISO_IR 126"), iso2022: "ISO 2022 IR 126", sets: &[IsoIr126] },
    DefinedTerm { single: Some("ISO_IR 138"), iso2022: "ISO 2022 IR 138", sets: &[IsoIr138] },
    DefinedTerm { single: Some("ISO_IR 148"), iso2022: "ISO 2022 IR 148", sets: &[IsoIr148] },
    DefinedTerm { single: Some("ISO_IR 203"), iso2022: "ISO 2022 IR 203", sets: &[IsoIr203] },
    DefinedTerm { single: Some("ISO_IR 166"), iso2022: "ISO 2022 IR 166", sets: &[IsoIr166] },
    DefinedTerm { single: Some("ISO_IR 13"), iso2022: "ISO 2022 IR 13", sets: &[IsoIr13, IsoIr14] },
    DefinedTerm { single: None, iso2022: "ISO 2022 IR 87", sets: &[IsoIr87] },
    DefinedTerm { single: None, iso2022: "ISO 2022 IR 159", sets: &[IsoIr159] },
    DefinedTerm { single: None, iso2022: "ISO 2022 IR 149", sets: &[IsoIr149] },
    DefinedTerm { single: None, iso2022: "ISO 2022 IR 58", sets: &[IsoIr58] },
    // the 7-bit default is also reachable as an empty first value
    DefinedTerm { single: None, iso2022: "", sets: &[IsoIr6] },
];

/// A combination of character sets switched by escape sequences,
/// resolved from the values of _Specific Character Set_.
#[derive(Debug, Clone, PartialEq)]
pub struct Iso2022 {
    terms: Vec<&'static str>,
    sets: Vec<CharacterSet>,
    initial_g0: CharacterSet,
    initial_g1: Option<CharacterSet>,
}

impl Iso2022 {
    /// Combine the given defined terms.
    /// The first one provides the initial designations.
    pub(crate) fn from_terms(terms: &[&'static DefinedTerm]) -> Self {
        let mut sets: Vec<CharacterSet> = vec![IsoIr6];
        for set in terms.iter().flat_map(|t| t.sets.iter().copied()) {
            if !sets.contains(&set) {
                sets.push(set);
            }
        }
        let first = terms.first().map(|t| t.sets).unwrap_or(&[]);
        let initial_g0 = first
            .iter()
            .copied()
            .find(|s| s.code_element() == CodeElement::G0)
            .unwrap_or(IsoIr6);
        let initial_g1 = first
            .iter()
            .copied()
            .find(|s| s.code_element() == CodeElement::G1);
        Iso2022 {
            terms: terms.iter().map(|t| t.iso2022).collect(),
            sets,
            initial_g0,
            initial_g1,
        }
    }

    /// The defined terms of this combination, as found in the data set.
    pub fn defined_terms(&self) -> &[&'static str] {
        &self.terms
    }

    /// The character sets which may be designated.
    pub fn character_sets(&self) -> &[CharacterSet] {
        &self.sets
    }

    /// The character set initially designated to G0.
    pub fn initial_g0(&self) -> CharacterSet {
        self.initial_g0
    }

    /// The character set initially designated to G1, if any.
    pub fn initial_g1(&self) -> Option<CharacterSet> {
        self.initial_g1
    }

    fn match_escape(&self, bytes: &[u8]) -> Option<CharacterSet> {
        self.sets
            .iter()
            .copied()
            .find(|s| bytes.starts_with(s.escape_sequence()))
    }

    /// Decode the given bytes.
    pub fn decode(&self, text: &[u8], kind: TextKind) -> DecodeResult<String> {
        let mut decoder = RunDecoder::new(self);
        let mut i = 0;
        while i < text.len() {
            let b = text[i];
            if b == ESC {
                decoder.flush();
                let set = self.match_escape(&text[i + 1..]).ok_or_else(|| {
                    let end = usize::min(text.len(), i + 4);
                    UnknownEscapeSequenceSnafu {
                        position: i,
                        sequence: text[i..end].to_vec(),
                    }
                    .build()
                })?;
                tracing::trace!("ISO 2022 designation of ISO-IR {} at {}", set.iso_ir(), i);
                match set.code_element() {
                    CodeElement::G0 => decoder.g0 = set,
                    CodeElement::G1 => decoder.g1 = Some(set),
                }
                i += 1 + set.escape_sequence().len();
                continue;
            }

            if b < 0x80 {
                if !decoder.g0.is_multi_byte() && kind.is_delimiter(b) {
                    decoder.flush();
                    decoder.out.push(char::from(b));
                    if b == b'\\' {
                        decoder.g0 = self.initial_g0;
                        decoder.g1 = self.initial_g1;
                    }
                } else {
                    let g0 = decoder.g0;
                    decoder.push(g0, b);
                }
            } else if let Some(g1) = decoder.g1 {
                decoder.push(g1, b);
            } else {
                tracing::warn!(
                    "Byte {:02X} at {} without a G1 character set, replaced",
                    b,
                    i
                );
                decoder.flush();
                decoder.out.push('\u{FFFD}');
            }
            i += 1;
        }
        decoder.flush();
        Ok(decoder.out)
    }

    /// Encode the given text,
    /// writing escape sequences whenever a character requires
    /// a set not currently designated.
    ///
    /// G0 returns to its initial set before each delimiter in need of it
    /// and at the end of the text.
    pub fn encode(&self, text: &str, kind: TextKind) -> EncodeResult<Vec<u8>> {
        let mut out = Vec::with_capacity(text.len());
        let mut g0 = self.initial_g0;
        let mut g1 = self.initial_g1;

        for c in text.chars() {
            if c.is_ascii() && kind.is_delimiter(c as u8) {
                if g0.is_multi_byte() {
                    designate(&mut out, IsoIr6);
                    g0 = IsoIr6;
                }
                out.push(c as u8);
                if c == '\\' {
                    if g0 != self.initial_g0 {
                        designate(&mut out, self.initial_g0);
                    }
                    g0 = self.initial_g0;
                    g1 = self.initial_g1;
                }
                continue;
            }

            if let Some(bytes) = g0.encode_char(c) {
                out.extend(bytes);
                continue;
            }
            if let Some(bytes) = g1.and_then(|g1| g1.encode_char(c)) {
                out.extend(bytes);
                continue;
            }
            let (set, bytes) = self
                .sets
                .iter()
                .find_map(|&s| s.encode_char(c).map(|bytes| (s, bytes)))
                .ok_or_else(|| {
                    UnrepresentableSnafu {
                        character: c,
                        charset: self.terms.join("\\"),
                    }
                    .build()
                })?;
            designate(&mut out, set);
            match set.code_element() {
                CodeElement::G0 => g0 = set,
                CodeElement::G1 => g1 = Some(set),
            }
            out.extend(bytes);
        }

        if g0 != self.initial_g0 {
            designate(&mut out, self.initial_g0);
        }
        Ok(out)
    }
}

fn designate(out: &mut Vec<u8>, set: CharacterSet) {
    out.push(ESC);
    out.extend_from_slice(set.escape_sequence());
}

/// Accumulates runs of bytes of the same character set.
struct RunDecoder {
    g0: CharacterSet,
    g1: Option<CharacterSet>,
    run: Vec<u8>,
    run_set: Option<CharacterSet>,
    out: String,
}

impl RunDecoder {
    fn new(encoding: &Iso2022) -> Self {
        RunDecoder {
            g0: encoding.initial_g0,
            g1: encoding.initial_g1,
            run: Vec::new(),
            run_set: None,
            out: String::new(),
        }
    }

    fn push(&mut self, set: CharacterSet, b: u8) {
        if self.run_set != Some(set) {
            self.flush();
            self.run_set = Some(set);
        }
        self.run.push(b);
    }

    fn flush(&mut self) {
        if let Some(set) = self.run_set.take() {
            let decoded = set.decode_run(&self.run);
            self.out.extend(decoded.nfkc());
            self.run.clear();
        }
    }
}
