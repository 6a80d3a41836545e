//! Declaration and implementation of a DICOM primitive value.
//!
//! See [`PrimitiveValue`](./enum.PrimitiveValue.html).

use super::number::{format_f32, format_f64};
use super::C;
use crate::header::Tag;
use std::borrow::Cow;
use std::fmt;

/// An enum representing a primitive value from a DICOM element.
/// The result of decoding an element's data value
/// may be one of the enumerated types
/// depending on its content and value representation.
///
/// # Example
///
/// ```
/// # use dcmio_core::PrimitiveValue;
/// # use smallvec::smallvec;
/// let value = PrimitiveValue::from("Smith^John");
/// assert_eq!(value, PrimitiveValue::Str("Smith^John".to_string()));
/// assert_eq!(value.multiplicity(), 1);
///
/// let value = PrimitiveValue::from(512_u16);
/// assert_eq!(value, PrimitiveValue::U16(smallvec![512]));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub enum PrimitiveValue {
    /// No data. Usually employed for zero-lengthed values.
    Empty,

    /// A sequence of strings.
    /// Used for AE, AS, CS, DA, DT, LO, PN, SH, TM, UC and UI.
    /// Also used for DS and IS when decoding with format preservation.
    Strs(C<String>),

    /// A single string.
    /// Used for ST, LT, UT and UR, which are never multi-valued.
    Str(String),

    /// A sequence of attribute tags.
    /// Used specifically for AT.
    Tags(C<Tag>),

    /// A sequence of bytes.
    /// Used for OB and UN.
    U8(C<u8>),

    /// A sequence of signed 16-bit integers.
    /// Used for SS.
    I16(C<i16>),

    /// A sequence of unsigned 16-bit integers.
    /// Used for US and OW.
    U16(C<u16>),

    /// A sequence of signed 32-bit integers.
    /// Used for SL.
    I32(C<i32>),

    /// A sequence of unsigned 32-bit integers.
    /// Used for UL and OL.
    U32(C<u32>),

    /// A sequence of signed 64-bit integers.
    /// Used for SV and IS.
    I64(C<i64>),

    /// A sequence of unsigned 64-bit integers.
    /// Used for UV and OV.
    U64(C<u64>),

    /// A sequence of 32-bit floating point numbers.
    /// Used for OF and FL.
    F32(C<f32>),

    /// A sequence of 64-bit floating point numbers.
    /// Used for OD, FD and DS.
    F64(C<f64>),
}

/// An enum representing an abstraction of a DICOM element's data value type.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ValueType {
    /// No data.
    Empty,
    /// A sequence of strings.
    Strs,
    /// A single string.
    Str,
    /// A sequence of attribute tags.
    Tags,
    /// Bytes.
    U8,
    /// Signed 16-bit integers.
    I16,
    /// Unsigned 16-bit integers.
    U16,
    /// Signed 32-bit integers.
    I32,
    /// Unsigned 32-bit integers.
    U32,
    /// Signed 64-bit integers.
    I64,
    /// Unsigned 64-bit integers.
    U64,
    /// 32-bit floating point numbers.
    F32,
    /// 64-bit floating point numbers.
    F64,
}

/// An error type for an attempt of accessing a value
/// in one internal representation as another.
#[derive(Debug, Clone, PartialEq)]
pub struct CastValueError {
    /// The value format requested
    pub requested: &'static str,
    /// The value's actual representation
    pub got: ValueType,
}

impl fmt::Display for CastValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "bad value cast: requested {} but value is {:?}",
            self.requested, self.got
        )
    }
}

impl std::error::Error for CastValueError {}

/// A utility macro for implementing the conversion from a core type into a
/// DICOM primitive value with a single element.
macro_rules! impl_from_for_primitive {
    ($typ: ty, $variant: ident) => {
        impl From<$typ> for PrimitiveValue {
            fn from(value: $typ) -> Self {
                PrimitiveValue::$variant(C::from_elem(value, 1))
            }
        }
    };
}

impl_from_for_primitive!(u8, U8);
impl_from_for_primitive!(u16, U16);
impl_from_for_primitive!(i16, I16);
impl_from_for_primitive!(u32, U32);
impl_from_for_primitive!(i32, I32);
impl_from_for_primitive!(u64, U64);
impl_from_for_primitive!(i64, I64);
impl_from_for_primitive!(f32, F32);
impl_from_for_primitive!(f64, F64);
impl_from_for_primitive!(Tag, Tags);

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        PrimitiveValue::Str(value)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::Str(value.to_owned())
    }
}

impl From<Vec<u8>> for PrimitiveValue {
    fn from(value: Vec<u8>) -> Self {
        PrimitiveValue::U8(C::from_vec(value))
    }
}

/// Implement a slice getter for a single variant.
macro_rules! impl_slice_getter {
    ($name: ident, $variant: ident, $ret: ty) => {
        #[doc = concat!("Get the inner `", stringify!($variant), "` values without copying.")]
        pub fn $name(&self) -> Result<&[$ret], CastValueError> {
            match self {
                PrimitiveValue::$variant(c) => Ok(c),
                _ => Err(CastValueError {
                    requested: stringify!($ret),
                    got: self.value_type(),
                }),
            }
        }
    };
}

impl PrimitiveValue {
    /// Obtain the number of individual elements. This number may not
    /// match the DICOM value multiplicity in some value representations.
    pub fn multiplicity(&self) -> u32 {
        use self::PrimitiveValue::*;
        match self {
            Empty => 0,
            Str(_) => 1,
            Strs(c) => c.len() as u32,
            Tags(c) => c.len() as u32,
            U8(c) => c.len() as u32,
            I16(c) => c.len() as u32,
            U16(c) => c.len() as u32,
            I32(c) => c.len() as u32,
            U32(c) => c.len() as u32,
            I64(c) => c.len() as u32,
            U64(c) => c.len() as u32,
            F32(c) => c.len() as u32,
            F64(c) => c.len() as u32,
        }
    }

    /// Determine whether this value holds no elements.
    pub fn is_empty(&self) -> bool {
        self.multiplicity() == 0
    }

    /// Retrieve the specific type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            PrimitiveValue::Empty => ValueType::Empty,
            PrimitiveValue::Strs(_) => ValueType::Strs,
            PrimitiveValue::Str(_) => ValueType::Str,
            PrimitiveValue::Tags(_) => ValueType::Tags,
            PrimitiveValue::U8(_) => ValueType::U8,
            PrimitiveValue::I16(_) => ValueType::I16,
            PrimitiveValue::U16(_) => ValueType::U16,
            PrimitiveValue::I32(_) => ValueType::I32,
            PrimitiveValue::U32(_) => ValueType::U32,
            PrimitiveValue::I64(_) => ValueType::I64,
            PrimitiveValue::U64(_) => ValueType::U64,
            PrimitiveValue::F32(_) => ValueType::F32,
            PrimitiveValue::F64(_) => ValueType::F64,
        }
    }

    /// Get a single string value.
    ///
    /// If it contains multiple strings, only the first one is returned.
    pub fn string(&self) -> Result<&str, CastValueError> {
        match self {
            PrimitiveValue::Str(s) => Ok(s),
            PrimitiveValue::Strs(c) if !c.is_empty() => Ok(&c[0]),
            _ => Err(CastValueError {
                requested: "string",
                got: self.value_type(),
            }),
        }
    }

    /// Get the inner strings of a `Str` or `Strs` value.
    pub fn strings(&self) -> Result<&[String], CastValueError> {
        match self {
            PrimitiveValue::Str(s) => Ok(std::slice::from_ref(s)),
            PrimitiveValue::Strs(c) => Ok(c),
            _ => Err(CastValueError {
                requested: "strings",
                got: self.value_type(),
            }),
        }
    }

    impl_slice_getter!(tags, Tags, Tag);
    impl_slice_getter!(uint8_slice, U8, u8);
    impl_slice_getter!(int16_slice, I16, i16);
    impl_slice_getter!(uint16_slice, U16, u16);
    impl_slice_getter!(int32_slice, I32, i32);
    impl_slice_getter!(uint32_slice, U32, u32);
    impl_slice_getter!(int64_slice, I64, i64);
    impl_slice_getter!(uint64_slice, U64, u64);
    impl_slice_getter!(float32_slice, F32, f32);
    impl_slice_getter!(float64_slice, F64, f64);

    /// Convert each element of the value into its textual form.
    ///
    /// Numbers use a culture-invariant decimal format,
    /// tags use the `(gggg,eeee)` notation,
    /// and bytes are not converted but listed as numbers.
    pub fn to_multi_str(&self) -> Cow<[String]> {
        fn seq_to_str<I>(iter: I) -> Vec<String>
        where
            I: IntoIterator,
            I::Item: ToString,
        {
            iter.into_iter().map(|x| x.to_string()).collect()
        }

        match self {
            PrimitiveValue::Empty => Cow::from(&[][..]),
            PrimitiveValue::Str(_) | PrimitiveValue::Strs(_) => {
                Cow::Borrowed(self.strings().unwrap_or(&[]))
            }
            PrimitiveValue::Tags(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::U8(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::I16(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::U16(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::I32(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::U32(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::I64(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::U64(c) => Cow::Owned(seq_to_str(c)),
            PrimitiveValue::F32(c) => Cow::Owned(c.iter().map(|v| format_f32(*v)).collect()),
            PrimitiveValue::F64(c) => Cow::Owned(c.iter().map(|v| format_f64(*v)).collect()),
        }
    }

    /// Convert the full primitive value into a single string,
    /// joining multiple values with a backslash.
    pub fn to_str(&self) -> Cow<str> {
        match self {
            PrimitiveValue::Str(s) => Cow::Borrowed(s),
            PrimitiveValue::Strs(c) if c.len() == 1 => Cow::Borrowed(&c[0]),
            _ => Cow::Owned(self.to_multi_str().join("\\")),
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}
