//! An in-memory DICOM data set.
//!
//! Elements are kept ordered by tag,
//! which is also the order in which they are written.

use crate::header::Tag;
use crate::value::{PrimitiveValue, Value};
use crate::vr::VR;
use std::collections::btree_map::{self, BTreeMap};
use std::iter::FromIterator;

/// A data element held in memory:
/// its tag, its value representation and its value.
///
/// The value length is not kept,
/// since it depends on the transfer syntax and character set
/// used when encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DataElement {
    tag: Tag,
    vr: VR,
    value: Value,
}

impl DataElement {
    /// Create a data element from the given parts.
    /// This method will not check
    /// whether the value representation is compatible with the value.
    pub fn new<V: Into<Value>>(tag: Tag, vr: VR, value: V) -> Self {
        DataElement {
            tag,
            vr,
            value: value.into(),
        }
    }

    /// Create an empty data element.
    pub fn empty(tag: Tag, vr: VR) -> Self {
        let value = if vr == VR::SQ {
            Value::Sequence(Vec::new())
        } else {
            Value::Primitive(PrimitiveValue::Empty)
        };
        DataElement { tag, vr, value }
    }

    /// The element's tag.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The element's value representation.
    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// The element's value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Take the value out of the element.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Get the primitive value as a single string with
    /// multiple values joined by a backslash.
    ///
    /// Returns `None` for sequences and pixel data fragments.
    pub fn to_str(&self) -> Option<std::borrow::Cow<str>> {
        self.value.primitive().map(|v| v.to_str())
    }
}

/// An ordered collection of data elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    entries: BTreeMap<Tag, DataElement>,
}

impl DataSet {
    /// Create an empty data set.
    pub fn new() -> Self {
        DataSet::default()
    }

    /// Insert an element, replacing and returning
    /// any previous element with the same tag.
    pub fn put(&mut self, element: DataElement) -> Option<DataElement> {
        self.entries.insert(element.tag(), element)
    }

    /// Insert a primitive element from its parts.
    pub fn put_value<V: Into<PrimitiveValue>>(&mut self, tag: Tag, vr: VR, value: V) {
        self.put(DataElement::new(tag, vr, value.into()));
    }

    /// Retrieve the element with the given tag.
    pub fn get(&self, tag: Tag) -> Option<&DataElement> {
        self.entries.get(&tag)
    }

    /// Remove the element with the given tag.
    pub fn remove(&mut self, tag: Tag) -> Option<DataElement> {
        self.entries.remove(&tag)
    }

    /// The number of elements at the top level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the data set has no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the elements in tag order.
    pub fn iter(&self) -> impl Iterator<Item = &DataElement> {
        self.entries.values()
    }

    /// Iterate over the tags in order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.entries.keys().copied()
    }
}

impl FromIterator<DataElement> for DataSet {
    fn from_iter<T: IntoIterator<Item = DataElement>>(iter: T) -> Self {
        DataSet {
            entries: iter.into_iter().map(|e| (e.tag(), e)).collect(),
        }
    }
}

impl Extend<DataElement> for DataSet {
    fn extend<T: IntoIterator<Item = DataElement>>(&mut self, iter: T) {
        self.entries
            .extend(iter.into_iter().map(|e| (e.tag(), e)));
    }
}

impl IntoIterator for DataSet {
    type Item = DataElement;
    type IntoIter = btree_map::IntoValues<Tag, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
