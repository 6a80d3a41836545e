//! Values of data elements:
//! primitive values, nested data set sequences,
//! and encapsulated pixel data.

use crate::dataset::DataSet;
use smallvec::SmallVec;

pub mod number;
mod primitive;

pub use self::primitive::{CastValueError, PrimitiveValue, ValueType};

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// Representation of a full DICOM value, which may be either primitive or
/// a list of nested data sets.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Primitive value.
    Primitive(PrimitiveValue),
    /// A sequence of items, each one a nested data set.
    Sequence(Vec<DataSet>),
    /// A sequence of encapsulated pixel data fragments.
    PixelSequence(PixelFragmentSequence),
}

impl Value {
    /// Obtain a reference to the primitive value, if applicable.
    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Obtain the nested items, if this is a sequence value.
    pub fn items(&self) -> Option<&[DataSet]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Obtain the encapsulated pixel data, if applicable.
    pub fn pixel_sequence(&self) -> Option<&PixelFragmentSequence> {
        match self {
            Value::PixelSequence(v) => Some(v),
            _ => None,
        }
    }

    /// The number of values, items, or fragments.
    pub fn multiplicity(&self) -> usize {
        match self {
            Value::Primitive(v) => v.multiplicity() as usize,
            Value::Sequence(items) => items.len(),
            Value::PixelSequence(seq) => seq.fragments.len(),
        }
    }
}

impl From<PrimitiveValue> for Value {
    fn from(v: PrimitiveValue) -> Self {
        Value::Primitive(v)
    }
}

impl From<Vec<DataSet>> for Value {
    fn from(items: Vec<DataSet>) -> Self {
        Value::Sequence(items)
    }
}

impl From<PixelFragmentSequence> for Value {
    fn from(v: PixelFragmentSequence) -> Self {
        Value::PixelSequence(v)
    }
}

/// Encapsulated pixel data as found on the wire:
/// the basic offset table followed by the compressed fragments.
///
/// Fragments are kept as raw bytes, no decompression takes place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelFragmentSequence {
    /// Byte offsets of the first fragment of each frame.
    pub offset_table: Vec<u32>,
    /// The fragment payloads in order.
    pub fragments: Vec<Vec<u8>>,
}

impl PixelFragmentSequence {
    /// Construct from its parts.
    pub fn new(offset_table: Vec<u32>, fragments: Vec<Vec<u8>>) -> Self {
        PixelFragmentSequence {
            offset_table,
            fragments,
        }
    }
}
