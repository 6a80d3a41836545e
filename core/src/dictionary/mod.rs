//! Attribute dictionaries and ambiguous value representations.
//!
//! A dictionary maps tags to keywords and their typical value representation.
//! It is consulted when the VR is not present on the wire
//! (implicit VR coding),
//! when naming elements in a generic tree,
//! and when choosing the VR of an element to be written.

use crate::header::Tag;
use crate::vr::VR;

pub mod stub;

/// Specification of a range of tags pertaining to an attribute.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TagRange {
    /// Only a specific tag
    Single(Tag),
    /// The two rightmost digits of the _group_ portion are open:
    /// `(GGxx,EEEE)`
    Group100(Tag),
    /// Generic group length tag,
    /// refers to any attribute of the form `(GGGG,0000)`
    GroupLength,
    /// Generic private creator tag,
    /// refers to any tag from `(GGGG,0010)` to `(GGGG,00FF)`,
    /// where `GGGG` is an odd number.
    PrivateCreator,
}

impl TagRange {
    /// Retrieve the inner tag representation of this range.
    pub fn inner(self) -> Tag {
        match self {
            TagRange::Single(tag) | TagRange::Group100(tag) => tag,
            TagRange::GroupLength => Tag(0x0000, 0x0000),
            TagRange::PrivateCreator => Tag(0x0009, 0x0010),
        }
    }

    /// Whether the given tag falls in this range.
    pub fn contains(self, tag: Tag) -> bool {
        match self {
            TagRange::Single(t) => t == tag,
            TagRange::Group100(t) => t.0 == tag.0 & 0xFF00 && t.1 == tag.1,
            TagRange::GroupLength => tag.is_group_length(),
            TagRange::PrivateCreator => tag.is_private() && (0x0010..=0x00FF).contains(&tag.1),
        }
    }
}

/// An "extended" value representation descriptor,
/// including the ambiguous VRs found in the dictionary.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum VirtualVr {
    /// Represents a standard value representation.
    Exact(VR),
    /// Either US or SS, depending on Pixel Representation.
    Xs,
    /// Either OB or OW, depending on the transfer syntax.
    Ox,
    /// Pixel data: OB or OW.
    Px,
    /// Either US, OW, or SS, as in LUT data.
    Lt,
}

impl From<VR> for VirtualVr {
    fn from(value: VR) -> Self {
        VirtualVr::Exact(value)
    }
}

impl VirtualVr {
    /// Return the underlying value representation
    /// in the case that it can be unambiguously defined.
    pub fn exact(self) -> Option<VR> {
        match self {
            VirtualVr::Exact(vr) => Some(vr),
            _ => None,
        }
    }

    /// The value representation used when no other information is available,
    /// such as when writing or when reading implicit VR data.
    ///
    /// US or SS is written as US,
    /// and all other ambiguous VRs as OW.
    pub fn relaxed(self) -> VR {
        match self {
            VirtualVr::Exact(vr) => vr,
            VirtualVr::Xs => VR::US,
            VirtualVr::Ox | VirtualVr::Px | VirtualVr::Lt => VR::OW,
        }
    }

    /// Whether the concrete VR is one of the alternatives of this descriptor.
    pub fn admits(self, vr: VR) -> bool {
        match self {
            VirtualVr::Exact(v) => v == vr,
            VirtualVr::Xs => matches!(vr, VR::US | VR::SS),
            VirtualVr::Ox | VirtualVr::Px => matches!(vr, VR::OB | VR::OW),
            VirtualVr::Lt => matches!(vr, VR::US | VR::SS | VR::OW),
        }
    }

    /// Pick the concrete value representation of an element.
    ///
    /// The VR found on the wire wins whenever present,
    /// so that an ambiguous attribute is read through the codec
    /// that was actually used to write it.
    /// Without one, the relaxed alternative is used.
    pub fn resolve(self, wire: Option<VR>) -> VR {
        match wire {
            Some(vr) => vr,
            None => self.relaxed(),
        }
    }
}

/// Type trait for a dictionary of DICOM attributes.
pub trait DataDictionary {
    /// The type of the dictionary entry.
    type Entry: DataDictionaryEntry;

    /// Fetch an entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Fetch an entry by its keyword (e.g. "PatientName").
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch an entry by its keyword or by its tag in `(gggg,eeee)` form.
    fn by_expr(&self, expr: &str) -> Option<&Self::Entry> {
        match parse_tag(expr) {
            Some(tag) => self.by_tag(tag),
            None => self.by_name(expr),
        }
    }
}

impl<T: ?Sized + DataDictionary> DataDictionary for &T {
    type Entry = T::Entry;

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }
}

/// Parse a tag in the forms `(gggg,eeee)`, `gggg,eeee` or `ggggeeee`.
pub fn parse_tag(text: &str) -> Option<Tag> {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);
    let (group, element) = match text.split_once(',') {
        Some(parts) => parts,
        None if text.len() == 8 => text.split_at(4),
        None => return None,
    };
    if group.len() != 4 || element.len() != 4 {
        return None;
    }
    let group = u16::from_str_radix(group, 16).ok()?;
    let element = u16::from_str_radix(element, 16).ok()?;
    Some(Tag(group, element))
}

/// The dictionary entry data type, representing a DICOM attribute.
pub trait DataDictionaryEntry {
    /// The full possible tag range of the attribute.
    fn tag_range(&self) -> TagRange;

    /// Fetch a single tag applicable to this attribute.
    fn tag(&self) -> Tag {
        self.tag_range().inner()
    }

    /// The keyword of the attribute, with no spaces, in UpperCamelCase.
    fn alias(&self) -> &str;

    /// The extended value representation descriptor of the attribute.
    fn vr(&self) -> VirtualVr;
}

/// A data type for a dictionary entry with a string slice for its alias.
#[derive(Debug, PartialEq, Clone)]
pub struct DataDictionaryEntryRef<'a> {
    /// The attribute tag or tag range
    pub tag: TagRange,
    /// The keyword of the attribute
    pub alias: &'a str,
    /// The typical value representation of the attribute
    pub vr: VirtualVr,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag_range(&self) -> TagRange {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VirtualVr {
        self.vr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_vr_resolution() {
        // the wire decides
        assert_eq!(VirtualVr::Ox.resolve(Some(VR::OB)), VR::OB);
        assert_eq!(VirtualVr::Ox.resolve(Some(VR::OW)), VR::OW);
        assert_eq!(VirtualVr::Xs.resolve(Some(VR::SS)), VR::SS);
        // defaults
        assert_eq!(VirtualVr::Xs.resolve(None), VR::US);
        assert_eq!(VirtualVr::Ox.resolve(None), VR::OW);
        assert_eq!(VirtualVr::Lt.relaxed(), VR::OW);
        assert_eq!(VirtualVr::Exact(VR::PN).resolve(None), VR::PN);

        assert!(VirtualVr::Px.admits(VR::OB));
        assert!(!VirtualVr::Px.admits(VR::US));
    }

    #[test]
    fn tag_ranges() {
        assert!(TagRange::Group100(Tag(0x6000, 0x3000)).contains(Tag(0x6002, 0x3000)));
        assert!(!TagRange::Group100(Tag(0x6000, 0x3000)).contains(Tag(0x6100, 0x3000)));
        assert!(TagRange::GroupLength.contains(Tag(0x0018, 0x0000)));
        assert!(TagRange::PrivateCreator.contains(Tag(0x0029, 0x0011)));
        assert!(!TagRange::PrivateCreator.contains(Tag(0x0028, 0x0011)));
    }

    #[test]
    fn parse_tags() {
        assert_eq!(parse_tag("(0010,0010)"), Some(Tag(0x0010, 0x0010)));
        assert_eq!(parse_tag("7FE0,0010"), Some(Tag(0x7FE0, 0x0010)));
        assert_eq!(parse_tag("00080005"), Some(Tag(0x0008, 0x0005)));
        assert_eq!(parse_tag("PatientName"), None);
        assert_eq!(parse_tag("(001,0010)"), None);
    }
}
