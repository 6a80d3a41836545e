//! The standard attribute dictionary, indexed on first use.

use crate::tags::ENTRIES;
use dcmio_core::dictionary::{
    DataDictionary, DataDictionaryEntryRef,
    TagRange::{self, *},
    VirtualVr,
};
use dcmio_core::{Tag, VR};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fmt;

static DICT: Lazy<StandardDataDictionaryRegistry> = Lazy::new(init_dictionary);

/// Retrieve a singleton instance of the standard dictionary registry.
///
/// The unit type [`StandardDataDictionary`]
/// already provides access to it through the [`DataDictionary`] trait.
#[inline]
pub fn registry() -> &'static StandardDataDictionaryRegistry {
    &DICT
}

/// The data struct actually containing the standard dictionary.
#[derive(Debug)]
pub struct StandardDataDictionaryRegistry {
    /// mapping: name → entry
    by_name: HashMap<&'static str, &'static DataDictionaryEntryRef<'static>>,
    /// mapping: tag → entry
    by_tag: HashMap<Tag, &'static DataDictionaryEntryRef<'static>>,
    /// repeating elements of the form (ggxx, eeee). The `xx` portion is zeroed.
    repeating_ggxx: HashSet<Tag>,
}

impl StandardDataDictionaryRegistry {
    fn new() -> StandardDataDictionaryRegistry {
        StandardDataDictionaryRegistry {
            by_name: HashMap::with_capacity(ENTRIES.len() + 2),
            by_tag: HashMap::with_capacity(ENTRIES.len()),
            repeating_ggxx: HashSet::new(),
        }
    }

    /// record the given dictionary entry reference
    fn index(&mut self, entry: &'static DataDictionaryEntryRef<'static>) -> &mut Self {
        self.by_name.insert(entry.alias, entry);
        self.by_tag.insert(entry.tag.inner(), entry);
        if let Group100(tag) = entry.tag {
            self.repeating_ggxx.insert(tag);
        }
        self
    }

    /// The number of attributes indexed.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

/// Generic Group Length dictionary entry.
static GROUP_LENGTH_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: TagRange::GroupLength,
    alias: "GenericGroupLength",
    vr: VirtualVr::Exact(VR::UL),
};

/// Generic Private Creator dictionary entry.
static PRIVATE_CREATOR_ENTRY: DataDictionaryEntryRef<'static> = DataDictionaryEntryRef {
    tag: TagRange::PrivateCreator,
    alias: "PrivateCreator",
    vr: VirtualVr::Exact(VR::LO),
};

/// A data element dictionary which consults
/// the library's global attribute registry.
///
/// The dictionary index is automatically initialized upon the first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardDataDictionary;

impl StandardDataDictionary {
    fn indexed_tag(tag: Tag) -> Option<&'static DataDictionaryEntryRef<'static>> {
        let r = registry();

        r.by_tag
            .get(&tag)
            .or_else(|| {
                // check tags repeating in different groups
                let group_trimmed = Tag(tag.0 & 0xFF00, tag.1);
                if r.repeating_ggxx.contains(&group_trimmed) {
                    return r.by_tag.get(&group_trimmed);
                }
                None
            })
            .copied()
            .or_else(|| {
                if PRIVATE_CREATOR_ENTRY.tag.contains(tag) {
                    return Some(&PRIVATE_CREATOR_ENTRY);
                }
                if GROUP_LENGTH_ENTRY.tag.contains(tag) {
                    return Some(&GROUP_LENGTH_ENTRY);
                }
                None
            })
    }
}

impl DataDictionary for StandardDataDictionary {
    type Entry = DataDictionaryEntryRef<'static>;

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        registry().by_name.get(name).copied()
    }

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        StandardDataDictionary::indexed_tag(tag)
    }
}

impl fmt::Display for StandardDataDictionary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Standard DICOM Data Dictionary")
    }
}

fn init_dictionary() -> StandardDataDictionaryRegistry {
    let mut d = StandardDataDictionaryRegistry::new();
    for entry in ENTRIES {
        d.index(entry);
    }
    // generic entries are looked up by name as well
    d.by_name.insert(GROUP_LENGTH_ENTRY.alias, &GROUP_LENGTH_ENTRY);
    d.by_name.insert(PRIVATE_CREATOR_ENTRY.alias, &PRIVATE_CREATOR_ENTRY);
    d
}

#[cfg(test)]
mod tests {
    use super::StandardDataDictionary;
    use dcmio_core::dictionary::{
        DataDictionary, DataDictionaryEntry, DataDictionaryEntryRef, TagRange::*, VirtualVr,
    };
    use dcmio_core::{Tag, VR};

    #[test]
    fn smoke_test() {
        let dict = StandardDataDictionary;

        assert_eq!(
            dict.by_name("PatientName"),
            Some(&DataDictionaryEntryRef {
                tag: Single(Tag(0x0010, 0x0010)),
                alias: "PatientName",
                vr: VirtualVr::Exact(VR::PN),
            })
        );

        let pixel_data = dict
            .by_tag(Tag(0x7FE0, 0x0010))
            .expect("Pixel Data attribute should exist");
        assert_eq!(pixel_data.alias, "PixelData");
        assert_eq!(pixel_data.vr, VirtualVr::Px);
        assert_eq!(pixel_data.vr().relaxed(), VR::OW);

        // repeated overlay data
        let overlay_data = dict
            .by_tag(Tag(0x60EE, 0x3000))
            .expect("Repeated Overlay Data attribute should exist");
        assert_eq!(overlay_data.tag, Group100(Tag(0x6000, 0x3000)));
        assert_eq!(overlay_data.alias, "OverlayData");
    }

    #[test]
    fn can_query_by_expression() {
        let dict = StandardDataDictionary;
        assert_eq!(
            dict.by_expr("(0008,0060)").map(|e| e.alias),
            Some("Modality")
        );
        assert_eq!(
            dict.by_expr("SpecificCharacterSet").map(|e| e.tag()),
            Some(crate::tags::SPECIFIC_CHARACTER_SET)
        );
        assert_eq!(dict.by_expr("OperatorNickname"), None);
    }

    #[test]
    fn has_generic_entries() {
        let dict = StandardDataDictionary;

        assert_eq!(
            dict.by_tag(Tag(0x0002, 0x0000)).map(|e| e.alias),
            Some("FileMetaInformationGroupLength")
        );
        assert_eq!(
            dict.by_tag(Tag(0x7FE0, 0x0000)),
            Some(&DataDictionaryEntryRef {
                tag: GroupLength,
                alias: "GenericGroupLength",
                vr: VirtualVr::Exact(VR::UL),
            }),
        );

        let private_creator = dict.by_tag(Tag(0x0009, 0x0010)).unwrap();
        assert_eq!(private_creator.tag, PrivateCreator);
        assert_eq!(private_creator.vr, VirtualVr::Exact(VR::LO));
        assert_eq!(dict.by_tag(Tag(0x000B, 0x00FF)), Some(private_creator));
        assert_eq!(dict.by_tag(Tag(0x0009, 0x1001)), None);
    }
}
