//! Attribute tags, value lengths and element headers.
//!
//! These are the types read and written at the start of every
//! data element and sequence item on the wire.

use crate::vr::VR;
use snafu::{Backtrace, Snafu};
use std::cmp::Ordering;
use std::fmt;

/// Error type for issues constructing a sequence item header.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SequenceItemHeaderError {
    /// Unexpected header tag.
    /// Only Item (FFFE,E000),
    /// Item Delimiter (FFFE,E00D),
    /// or Sequence Delimiter (FFFE,E0DD)
    /// are admitted.
    #[snafu(display("Unexpected tag {}", tag))]
    UnexpectedTag { tag: Tag, backtrace: Backtrace },
    /// Unexpected delimiter value length.
    /// Must be zero for item and sequence delimiters.
    #[snafu(display("Unexpected delimiter length {}", len))]
    UnexpectedDelimiterLength { len: Length, backtrace: Backtrace },
}

type Result<T, E = SequenceItemHeaderError> = std::result::Result<T, E>;

/// Idiomatic alias for a tag's group number.
pub type GroupNumber = u16;
/// Idiomatic alias for a tag's element number.
pub type ElementNumber = u16;

/// The data type for DICOM data element tags.
///
/// Tags are totally ordered by their packed 32-bit value,
/// group first and element second,
/// which is the order in which elements appear in a data set.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// Item (FFFE,E000)
    pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
    /// Item Delimitation Item (FFFE,E00D)
    pub const ITEM_DELIMITER: Tag = Tag(0xFFFE, 0xE00D);
    /// Sequence Delimitation Item (FFFE,E0DD)
    pub const SEQUENCE_DELIMITER: Tag = Tag(0xFFFE, 0xE0DD);
    /// Specific Character Set (0008,0005)
    pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
    /// Pixel Data (7FE0,0010)
    pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
    /// The group reserved for pixel data and its siblings.
    pub const PIXEL_DATA_GROUP: GroupNumber = 0x7FE0;

    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }

    /// The tag packed into a single 32-bit number,
    /// group in the upper half.
    #[inline]
    pub fn to_u32(self) -> u32 {
        (u32::from(self.0) << 16) | u32::from(self.1)
    }

    /// Whether the tag belongs to a private group (odd group number).
    #[inline]
    pub fn is_private(self) -> bool {
        self.0 & 1 == 1
    }

    /// Whether this is either the item delimiter or the sequence delimiter.
    #[inline]
    pub fn is_delimitation_item(self) -> bool {
        self == Tag::ITEM_DELIMITER || self == Tag::SEQUENCE_DELIMITER
    }

    /// Whether an element with this tag carries a VR field
    /// in explicit VR coding.
    ///
    /// Items and delimiters never do.
    #[inline]
    pub fn has_vr(self) -> bool {
        !(self == Tag::ITEM || self.is_delimitation_item())
    }

    /// Whether this is a legacy group length element `(gggg,0000)`.
    #[inline]
    pub fn is_group_length(self) -> bool {
        self.1 == 0x0000
    }

    /// Whether the tag lives in the pixel data group `(7FE0,xxxx)`.
    #[inline]
    pub fn is_in_pixel_data_group(self) -> bool {
        self.0 == Tag::PIXEL_DATA_GROUP
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<u32> for Tag {
    #[inline]
    fn from(value: u32) -> Tag {
        Tag((value >> 16) as u16, value as u16)
    }
}

/// A type for representing data set content length, in bytes.
/// An internal value of `0xFFFF_FFFF` represents an undefined
/// length, which is to be resolved by looking for a delimitation item.
///
/// Two undefined lengths are not equal,
/// and arithmetic involving an undefined length stays undefined.
///
/// ```
/// # use dcmio_core::Length;
/// assert_ne!(Length::UNDEFINED, Length::UNDEFINED);
/// assert!((Length::defined(64) + Length::UNDEFINED).is_undefined());
/// assert!(Length::defined(16) < Length::defined(64));
/// assert!(!(Length::UNDEFINED < Length::defined(64)));
/// ```
#[derive(Clone, Copy)]
pub struct Length(pub u32);

const UNDEFINED_LEN: u32 = 0xFFFF_FFFF;

impl Length {
    /// A length that is undefined.
    pub const UNDEFINED: Self = Length(UNDEFINED_LEN);

    /// Create a new length value with the given number of bytes.
    ///
    /// # Panic
    ///
    /// This function will panic if `len` represents an undefined length.
    #[inline]
    pub fn defined(len: u32) -> Self {
        assert_ne!(len, UNDEFINED_LEN);
        Length(len)
    }

    /// Check whether this length is undefined.
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED_LEN
    }

    /// Check whether this length is well defined.
    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// Fetch the concrete length value, if available.
    #[inline]
    pub fn get(self) -> Option<u32> {
        match self.0 {
            UNDEFINED_LEN => None,
            v => Some(v),
        }
    }
}

impl From<u32> for Length {
    #[inline]
    fn from(o: u32) -> Self {
        Length(o)
    }
}

impl PartialEq<Length> for Length {
    fn eq(&self, rhs: &Length) -> bool {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => false,
            (l1, l2) => l1 == l2,
        }
    }
}

impl PartialOrd<Length> for Length {
    fn partial_cmp(&self, rhs: &Length) -> Option<Ordering> {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => None,
            (l1, l2) => Some(l1.cmp(&l2)),
        }
    }
}

impl std::ops::Add<Length> for Length {
    type Output = Self;

    fn add(self, rhs: Length) -> Self::Output {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => Length::UNDEFINED,
            (l1, l2) => {
                let o = l1 + l2;
                debug_assert!(
                    o != UNDEFINED_LEN,
                    "integer overflow (0xFFFF_FFFF reserved for undefined length)"
                );
                Length(o)
            }
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("Length(Undefined)"),
            l => f.debug_tuple("Length").field(&l).finish(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("U/L"),
            l => write!(f, "{}", &l),
        }
    }
}

/// Trait for any DICOM entity (element or item) which may have a length.
pub trait HasLength {
    /// Retrieve the value data's length as specified by the data element or
    /// item, in bytes.
    fn length(&self) -> Length;

    /// Check whether the value is empty (0 length).
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// A trait for a data type containing a DICOM header.
pub trait Header: HasLength {
    /// Retrieve the element's tag.
    fn tag(&self) -> Tag;

    /// Check whether this is the header of encapsulated pixel data.
    fn is_encapsulated_pixeldata(&self) -> bool {
        self.tag() == Tag::PIXEL_DATA && self.length().is_undefined()
    }
}

/// A data structure for a data element header, containing
/// a tag, value representation and specified length.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DataElementHeader {
    /// DICOM tag
    pub tag: Tag,
    /// Value Representation
    pub vr: VR,
    /// Element length
    pub len: Length,
}

impl HasLength for DataElementHeader {
    #[inline]
    fn length(&self) -> Length {
        self.len
    }
}

impl Header for DataElementHeader {
    #[inline]
    fn tag(&self) -> Tag {
        self.tag
    }
}

impl DataElementHeader {
    /// Create a new data element header with the given properties.
    #[inline]
    pub fn new<T: Into<Tag>>(tag: T, vr: VR, len: Length) -> DataElementHeader {
        DataElementHeader {
            tag: tag.into(),
            vr,
            len,
        }
    }

    /// Retrieve the element's value representation.
    #[inline]
    pub fn vr(&self) -> VR {
        self.vr
    }

    /// Check whether the header announces a nested data set structure:
    /// an SQ element, or an undefined length `UN` element.
    #[inline]
    pub fn is_non_primitive(&self) -> bool {
        self.vr == VR::SQ || (self.vr == VR::UN && self.len.is_undefined())
    }
}

impl From<SequenceItemHeader> for DataElementHeader {
    fn from(value: SequenceItemHeader) -> DataElementHeader {
        DataElementHeader {
            tag: value.tag(),
            vr: VR::UN,
            len: value.length(),
        }
    }
}

/// Data type for describing a sequence item data element.
/// If the element represents an item, it will also contain
/// the specified length.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SequenceItemHeader {
    /// The cursor contains an item.
    Item {
        /// the length of the item in bytes (can be undefined)
        len: Length,
    },
    /// The cursor read an item delimiter.
    ItemDelimiter,
    /// The cursor read a sequence delimiter.
    SequenceDelimiter,
}

impl SequenceItemHeader {
    /// Create a sequence item header using the element's raw properties.
    /// An error is raised if the given properties do not relate to a
    /// sequence item, an item delimiter or a sequence delimiter.
    pub fn new<T: Into<Tag>>(tag: T, len: Length) -> Result<SequenceItemHeader> {
        match tag.into() {
            Tag::ITEM => Ok(SequenceItemHeader::Item { len }),
            Tag::ITEM_DELIMITER | Tag::SEQUENCE_DELIMITER if len != Length(0) => {
                UnexpectedDelimiterLengthSnafu { len }.fail()
            }
            Tag::ITEM_DELIMITER => Ok(SequenceItemHeader::ItemDelimiter),
            Tag::SEQUENCE_DELIMITER => Ok(SequenceItemHeader::SequenceDelimiter),
            tag => UnexpectedTagSnafu { tag }.fail(),
        }
    }
}

impl HasLength for SequenceItemHeader {
    #[inline]
    fn length(&self) -> Length {
        match *self {
            SequenceItemHeader::Item { len } => len,
            SequenceItemHeader::ItemDelimiter | SequenceItemHeader::SequenceDelimiter => Length(0),
        }
    }
}

impl Header for SequenceItemHeader {
    #[inline]
    fn tag(&self) -> Tag {
        match *self {
            SequenceItemHeader::Item { .. } => Tag::ITEM,
            SequenceItemHeader::ItemDelimiter => Tag::ITEM_DELIMITER,
            SequenceItemHeader::SequenceDelimiter => Tag::SEQUENCE_DELIMITER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_ordered_by_group_then_element() {
        let mut tags = vec![
            Tag(0x7FE0, 0x0010),
            Tag(0x0008, 0x0005),
            Tag(0x0010, 0x0010),
            Tag(0x0008, 0x0016),
            Tag(0x0009, 0x0001),
        ];
        tags.sort();
        assert_eq!(
            tags,
            vec![
                Tag(0x0008, 0x0005),
                Tag(0x0008, 0x0016),
                Tag(0x0009, 0x0001),
                Tag(0x0010, 0x0010),
                Tag(0x7FE0, 0x0010),
            ]
        );
        for pair in tags.windows(2) {
            assert!(pair[0].to_u32() < pair[1].to_u32());
        }
    }

    #[test]
    fn tag_classification() {
        assert!(Tag(0x0009, 0x0010).is_private());
        assert!(!Tag(0x0010, 0x0010).is_private());

        assert!(!Tag::ITEM.has_vr());
        assert!(!Tag::ITEM_DELIMITER.has_vr());
        assert!(!Tag::SEQUENCE_DELIMITER.has_vr());
        assert!(Tag::PIXEL_DATA.has_vr());

        assert!(Tag::ITEM_DELIMITER.is_delimitation_item());
        assert!(Tag::SEQUENCE_DELIMITER.is_delimitation_item());
        assert!(!Tag::ITEM.is_delimitation_item());

        assert!(Tag(0x7FE0, 0x0005).is_in_pixel_data_group());
        assert!(Tag(0x0018, 0x0000).is_group_length());
    }

    #[test]
    fn tag_display() {
        assert_eq!(Tag(0x0010, 0x0010).to_string(), "(0010,0010)");
        assert_eq!(Tag::from(0x7FE0_0010).to_string(), "(7FE0,0010)");
    }

    #[test]
    fn sequence_item_header_from_parts() {
        assert_eq!(
            SequenceItemHeader::new(Tag::ITEM, Length(16)).unwrap(),
            SequenceItemHeader::Item { len: Length(16) }
        );
        assert_eq!(
            SequenceItemHeader::new(Tag::SEQUENCE_DELIMITER, Length(0)).unwrap(),
            SequenceItemHeader::SequenceDelimiter
        );
        assert!(matches!(
            SequenceItemHeader::new(Tag::ITEM_DELIMITER, Length(4)),
            Err(SequenceItemHeaderError::UnexpectedDelimiterLength { .. })
        ));
        assert!(matches!(
            SequenceItemHeader::new(Tag(0x0010, 0x0010), Length(4)),
            Err(SequenceItemHeaderError::UnexpectedTag { .. })
        ));
    }
}
