#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! Core library of the dcmio DICOM codec,
//! containing the data structures shared by the encoding and parsing layers.
//!
//! - [`header`] comprises the attribute tag, value length
//!   and element header types.
//! - [`vr`] holds the value representation enumeration
//!   together with the static registry of their wire properties.
//! - [`dictionary`] describes the behavior of attribute dictionaries
//!   and ambiguous value representations.
//! - [`value`] holds primitive values and element values,
//!   including nested data sets and encapsulated pixel data.
//! - [`dataset`] is an ordered in-memory data set.
//!
//! [`dataset`]: ./dataset/index.html
//! [`dictionary`]: ./dictionary/index.html
//! [`header`]: ./header/index.html
//! [`value`]: ./value/index.html
//! [`vr`]: ./vr/index.html

pub mod dataset;
pub mod dictionary;
pub mod header;
pub mod value;
pub mod vr;

pub use dataset::{DataElement, DataSet};
pub use dictionary::DataDictionary;
pub use header::{DataElementHeader, HasLength, Header, Length, SequenceItemHeader, Tag};
pub use value::{PrimitiveValue, Value};
pub use vr::VR;

// re-export crates that are part of the public API
pub use smallvec;

/// Helper macro for constructing a DICOM primitive value,
/// of an arbitrary variant and multiplicity.
///
/// # Example
///
/// ```
/// # use dcmio_core::{dcm_value, PrimitiveValue};
/// let value = dcm_value!(U16, [1, 2, 5]);
/// assert_eq!(value.multiplicity(), 3);
/// let value = dcm_value!(Str, "ORIGINAL");
/// assert_eq!(value, PrimitiveValue::Str("ORIGINAL".into()));
/// ```
#[macro_export]
macro_rules! dcm_value {
    (Strs, [ $($elem: expr),* ]) => {
        {
            use $crate::smallvec::smallvec;
            $crate::value::PrimitiveValue::Strs(smallvec![$(String::from($elem),)*])
        }
    };
    ($typ: ident, [ $($elem: expr),* ]) => {
        {
            use $crate::smallvec::smallvec;
            $crate::value::PrimitiveValue :: $typ (smallvec![$($elem,)*])
        }
    };
    (Str, $elem: expr) => {
        $crate::value::PrimitiveValue::Str(String::from($elem))
    };
    ($typ: ident, $elem: expr) => {
        $crate::value::PrimitiveValue :: $typ ($crate::value::C::from_elem($elem, 1))
    };
}
