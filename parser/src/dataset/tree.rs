//! Conversion of a data set into a generic tree of nodes,
//! suitable for dumping in a human readable form.
//!
//! Each node names its attribute through a data dictionary.
//! Elements which cannot be interpreted without further knowledge
//! are recorded as skipped nodes instead of failing the conversion.
use super::read::{DataSetReader, Result};
use crate::stateful::decode::StatefulDecode;
use dcmio_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dcmio_core::{Tag, Value, VR};
use serde::{Serialize, Serializer};
use std::fmt;

/// A node in the tree representation of a data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    /// the element tag
    #[serde(serialize_with = "serialize_display")]
    pub tag: Tag,
    /// the attribute keyword, if known to the dictionary
    pub name: Option<String>,
    /// the value representation
    #[serde(serialize_with = "serialize_display")]
    pub vr: VR,
    /// the contents of the node
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// The contents of a tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// A primitive value in text form.
    Value { value: String },
    /// A sequence, one list of nodes per item.
    Sequence { items: Vec<Vec<TreeNode>> },
    /// An element whose value was not interpreted.
    Skipped { reason: SkipReason },
}

/// Why an element was skipped in the tree.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The value representation could not be resolved.
    UnknownVr,
    /// The value is not a sequence but has undefined length,
    /// such as encapsulated pixel data.
    UndefinedLength,
}

fn serialize_display<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

impl<'a, D> DataSetReader<'a, D>
where
    D: ?Sized + StatefulDecode,
{
    /// Read the remaining elements of the data set as a tree,
    /// resolving attribute names with the given dictionary.
    pub fn read_tree<Dict>(&mut self, dict: &Dict) -> Result<Vec<TreeNode>>
    where
        Dict: DataDictionary,
    {
        let mut nodes = Vec::new();
        loop {
            let header = match self.header() {
                Some(header) => *header,
                None => match self.read_header()? {
                    Some(header) => header,
                    None => return Ok(nodes),
                },
            };
            let name = dict.by_tag(header.tag).map(|e| e.alias().to_string());

            let kind = if header.vr == VR::UN {
                self.skip_value()?;
                NodeKind::Skipped {
                    reason: SkipReason::UnknownVr,
                }
            } else if header.vr != VR::SQ && header.len.is_undefined() {
                self.skip_value()?;
                NodeKind::Skipped {
                    reason: SkipReason::UndefinedLength,
                }
            } else if header.vr == VR::SQ {
                let mut items = Vec::new();
                self.read_items(|item| {
                    items.push(item.read_tree(dict)?);
                    Ok(())
                })?;
                NodeKind::Sequence { items }
            } else {
                let value = match self.read_value()? {
                    Value::Primitive(v) => v.to_str().into_owned(),
                    _ => String::new(),
                };
                NodeKind::Value { value }
            };

            nodes.push(TreeNode {
                tag: header.tag,
                name,
                vr: header.vr,
                kind,
            });
        }
    }
}
