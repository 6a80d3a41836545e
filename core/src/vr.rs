//! Value representations and their wire properties.
//!
//! Every VR has a static [`VrDescriptor`] describing how its values are
//! laid out in a data set:
//! the width of the explicit VR length field,
//! whether the value may have undefined length,
//! whether it is single or multi valued,
//! its padding byte,
//! and the kind of value it holds.
//! Descriptors are looked up through [`VR::descriptor`],
//! and VRs are resolved from their two-byte wire code
//! through a table built once on first use.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An enum type for a DICOM value representation.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Single
    FL,
    /// Floating Point Double
    FD,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Double
    OD,
    /// Other Float
    OF,
    /// Other Long
    OL,
    /// Other Very Long
    OV,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Signed Very Long
    SV,
    /// Time
    TM,
    /// Unlimited Characters
    UC,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Universal Resource Identifier or Universal Resource Locator (URI/URL)
    UR,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
    /// Unsigned Very Long
    UV,
}

/// Width of the value length field in explicit VR coding.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LengthField {
    /// 2 bytes of length, right after the VR.
    Short,
    /// 2 reserved bytes followed by 4 bytes of length.
    Long,
}

impl LengthField {
    /// The full size of an explicit VR element header
    /// using this length field, in bytes.
    pub fn header_size(self) -> u32 {
        match self {
            LengthField::Short => 8,
            LengthField::Long => 12,
        }
    }

    /// The largest value length which fits in this field.
    pub fn max_length(self) -> u32 {
        match self {
            LengthField::Short => 0xFFFF,
            LengthField::Long => 0xFFFF_FFFE,
        }
    }
}

/// Whether a value representation holds one value or
/// a backslash-delimited (or fixed-width) list of values.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Multiplicity {
    /// The whole value is a single unit.
    Single,
    /// The value is a list of components.
    Multi,
}

/// The binary element types read and written by binary VRs.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryKind {
    /// bytes
    U8,
    /// 16-bit signed integers
    I16,
    /// 16-bit unsigned integers
    U16,
    /// 32-bit signed integers
    I32,
    /// 32-bit unsigned integers
    U32,
    /// 64-bit signed integers
    I64,
    /// 64-bit unsigned integers
    U64,
    /// single precision floats
    F32,
    /// double precision floats
    F64,
}

impl BinaryKind {
    /// Size of each element in bytes.
    pub fn width(self) -> u32 {
        match self {
            BinaryKind::U8 => 1,
            BinaryKind::I16 | BinaryKind::U16 => 2,
            BinaryKind::I32 | BinaryKind::U32 | BinaryKind::F32 => 4,
            BinaryKind::I64 | BinaryKind::U64 | BinaryKind::F64 => 8,
        }
    }
}

/// The kind of value held by a value representation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValueKind {
    /// Text restricted to the default repertoire.
    Ascii,
    /// Text subject to the specific character set in effect.
    Text,
    /// Decimal numbers in text form (DS).
    Decimal,
    /// Integer numbers in text form (IS).
    Integer,
    /// Fixed-width binary numbers.
    Binary(BinaryKind),
    /// A list of attribute tags (AT).
    Tags,
    /// A sequence of nested data sets (SQ).
    Sequence,
}

/// The static description of a value representation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VrDescriptor {
    /// The value representation described.
    pub vr: VR,
    /// The explicit VR length field width.
    pub length_field: LengthField,
    /// Whether the value may be encoded with undefined length.
    pub undefined_length: bool,
    /// Single or multi valued.
    pub multiplicity: Multiplicity,
    /// The kind of value.
    pub kind: ValueKind,
    /// Byte used to pad a value of odd length.
    pub padding: u8,
    /// The maximum length of each component, in bytes,
    /// if the standard caps it.
    pub max_component_length: Option<u32>,
}

impl VrDescriptor {
    /// Whether values of this VR are textual.
    pub fn is_text(&self) -> bool {
        matches!(
            self.kind,
            ValueKind::Ascii | ValueKind::Text | ValueKind::Decimal | ValueKind::Integer
        )
    }

    /// Whether text values are subject to the specific character set.
    pub fn uses_specific_charset(&self) -> bool {
        self.kind == ValueKind::Text
    }
}

const fn text(
    vr: VR,
    length_field: LengthField,
    multiplicity: Multiplicity,
    kind: ValueKind,
    max: Option<u32>,
) -> VrDescriptor {
    VrDescriptor {
        vr,
        length_field,
        undefined_length: false,
        multiplicity,
        kind,
        padding: b' ',
        max_component_length: max,
    }
}

const fn binary(
    vr: VR,
    length_field: LengthField,
    undefined_length: bool,
    multiplicity: Multiplicity,
    kind: BinaryKind,
) -> VrDescriptor {
    VrDescriptor {
        vr,
        length_field,
        undefined_length,
        multiplicity,
        kind: ValueKind::Binary(kind),
        padding: 0,
        max_component_length: None,
    }
}

use self::LengthField::{Long, Short};
use self::Multiplicity::{Multi, Single};

/// The registry of all value representation descriptors,
/// in the same order as the variants of [`VR`].
static DESCRIPTORS: [VrDescriptor; 34] = [
    text(VR::AE, Short, Multi, ValueKind::Ascii, Some(16)),
    text(VR::AS, Short, Multi, ValueKind::Ascii, Some(4)),
    VrDescriptor {
        vr: VR::AT,
        length_field: Short,
        undefined_length: false,
        multiplicity: Multi,
        kind: ValueKind::Tags,
        padding: 0,
        max_component_length: None,
    },
    text(VR::CS, Short, Multi, ValueKind::Ascii, Some(16)),
    text(VR::DA, Short, Multi, ValueKind::Ascii, Some(8)),
    text(VR::DS, Short, Multi, ValueKind::Decimal, Some(16)),
    text(VR::DT, Short, Multi, ValueKind::Ascii, Some(26)),
    binary(VR::FL, Short, false, Multi, BinaryKind::F32),
    binary(VR::FD, Short, false, Multi, BinaryKind::F64),
    text(VR::IS, Short, Multi, ValueKind::Integer, Some(12)),
    text(VR::LO, Short, Multi, ValueKind::Text, Some(64)),
    text(VR::LT, Short, Single, ValueKind::Text, Some(10240)),
    binary(VR::OB, Long, true, Single, BinaryKind::U8),
    binary(VR::OD, Long, true, Single, BinaryKind::F64),
    binary(VR::OF, Long, true, Single, BinaryKind::F32),
    binary(VR::OL, Long, true, Single, BinaryKind::U32),
    binary(VR::OV, Long, true, Single, BinaryKind::U64),
    binary(VR::OW, Long, true, Single, BinaryKind::U16),
    text(VR::PN, Short, Multi, ValueKind::Text, Some(64 * 3 + 2)),
    text(VR::SH, Short, Multi, ValueKind::Text, Some(16)),
    binary(VR::SL, Short, false, Multi, BinaryKind::I32),
    VrDescriptor {
        vr: VR::SQ,
        length_field: Long,
        undefined_length: true,
        multiplicity: Single,
        kind: ValueKind::Sequence,
        padding: 0,
        max_component_length: None,
    },
    binary(VR::SS, Short, false, Multi, BinaryKind::I16),
    text(VR::ST, Short, Single, ValueKind::Text, Some(1024)),
    binary(VR::SV, Long, false, Multi, BinaryKind::I64),
    text(VR::TM, Short, Multi, ValueKind::Ascii, Some(14)),
    text(VR::UC, Long, Multi, ValueKind::Text, None),
    VrDescriptor {
        vr: VR::UI,
        length_field: Short,
        undefined_length: false,
        multiplicity: Multi,
        kind: ValueKind::Ascii,
        padding: 0,
        max_component_length: Some(64),
    },
    binary(VR::UL, Short, false, Multi, BinaryKind::U32),
    binary(VR::UN, Long, true, Single, BinaryKind::U8),
    text(VR::UR, Long, Single, ValueKind::Ascii, None),
    binary(VR::US, Short, false, Multi, BinaryKind::U16),
    text(VR::UT, Long, Single, ValueKind::Text, None),
    binary(VR::UV, Long, false, Multi, BinaryKind::U64),
];

/// Lookup table from the two-byte wire code to the value representation.
static BY_CODE: Lazy<HashMap<[u8; 2], VR>> = Lazy::new(|| {
    DESCRIPTORS
        .iter()
        .map(|d| (d.vr.to_bytes(), d.vr))
        .collect()
});

impl VR {
    /// Obtain the value representation corresponding to the given two bytes.
    /// Each byte should represent an alphabetic character in upper case.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        BY_CODE.get(&chars).copied()
    }

    /// Retrieve the static descriptor of this VR.
    pub fn descriptor(self) -> &'static VrDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Retrieve a string representation of this VR.
    pub fn to_string(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE",
            AS => "AS",
            AT => "AT",
            CS => "CS",
            DA => "DA",
            DS => "DS",
            DT => "DT",
            FL => "FL",
            FD => "FD",
            IS => "IS",
            LO => "LO",
            LT => "LT",
            OB => "OB",
            OD => "OD",
            OF => "OF",
            OL => "OL",
            OV => "OV",
            OW => "OW",
            PN => "PN",
            SH => "SH",
            SL => "SL",
            SQ => "SQ",
            SS => "SS",
            ST => "ST",
            SV => "SV",
            TM => "TM",
            UC => "UC",
            UI => "UI",
            UL => "UL",
            UN => "UN",
            UR => "UR",
            US => "US",
            UT => "UT",
            UV => "UV",
        }
    }

    /// Retrieve a copy of this VR's byte representation.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.to_string().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// The explicit VR length field width of this VR.
    #[inline]
    pub fn length_field(self) -> LengthField {
        self.descriptor().length_field
    }

    /// Whether values of this VR may be encoded with undefined length.
    #[inline]
    pub fn allows_undefined_length(self) -> bool {
        self.descriptor().undefined_length
    }

    /// Whether this VR holds a single value.
    #[inline]
    pub fn is_single_valued(self) -> bool {
        self.descriptor().multiplicity == Multiplicity::Single
    }

    /// The padding byte for values of odd length.
    #[inline]
    pub fn padding(self) -> u8 {
        self.descriptor().padding
    }
}

/// Obtain the value representation corresponding to the given string.
/// The string should hold exactly two alphabetic characters in upper case.
impl FromStr for VR {
    type Err = &'static str;

    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        match string.as_bytes() {
            &[a, b] => VR::from_binary([a, b]).ok_or("no such value representation"),
            _ => Err("no such value representation"),
        }
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(VR::to_string(*self))
    }
}
