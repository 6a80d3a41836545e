//! Implicit VR Little Endian header decoding.

use crate::decode::basic::BasicDecoder;
use crate::decode::{
    decode_header_tag, decode_item_header_with, BasicDecode, Decode, ReadLengthSnafu,
    ReadTagSnafu, Result,
};
use dcmio_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dcmio_core::header::{DataElementHeader, Length, SequenceItemHeader};
use dcmio_core::{Tag, VR};
use dcmio_dictionary_std::StandardDataDictionary;
use snafu::ResultExt;
use std::fmt;
use std::io::Read;

/// An implicit VR little endian decoder which uses the standard data dictionary.
pub type StandardImplicitVRLittleEndianDecoder =
    ImplicitVRLittleEndianDecoder<StandardDataDictionary>;

/// A data element decoder for the Implicit VR Little Endian transfer syntax.
/// This type contains an attribute dictionary for resolving
/// value representations.
///
/// Attributes unknown to the dictionary are given the VR UN.
/// Ambiguous dictionary VRs take their most permissive form.
#[derive(Clone, PartialEq)]
pub struct ImplicitVRLittleEndianDecoder<D> {
    dict: D,
}

impl<D> fmt::Debug for ImplicitVRLittleEndianDecoder<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ImplicitVRLittleEndianDecoder")
            .field("dict", &"«omitted»")
            .finish()
    }
}

impl Default for ImplicitVRLittleEndianDecoder<StandardDataDictionary> {
    fn default() -> Self {
        ImplicitVRLittleEndianDecoder::with_dict(StandardDataDictionary)
    }
}

impl<D> ImplicitVRLittleEndianDecoder<D>
where
    D: DataDictionary,
{
    /// Retrieve this decoder using a custom data dictionary.
    pub fn with_dict(dictionary: D) -> Self {
        ImplicitVRLittleEndianDecoder { dict: dictionary }
    }

    /// Resolve the value representation of an attribute
    /// from the dictionary.
    pub fn resolve_vr(&self, tag: Tag) -> VR {
        if !tag.has_vr() {
            return VR::UN;
        }
        self.dict
            .by_tag(tag)
            .map(|entry| entry.vr().relaxed())
            .unwrap_or(VR::UN)
    }
}

impl<D> Decode for ImplicitVRLittleEndianDecoder<D>
where
    D: DataDictionary,
{
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        let tag = decode_header_tag(BasicDecoder::LE, source)?;

        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadLengthSnafu)?;
        let len = BasicDecoder::LE
            .decode_ul(&buf[..])
            .context(ReadLengthSnafu)?;

        let vr = self.resolve_vr(tag);
        Ok((DataElementHeader::new(tag, vr, Length(len)), 8))
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<SequenceItemHeader>
    where
        S: ?Sized + Read,
    {
        decode_item_header_with(BasicDecoder::LE, source)
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf).context(ReadTagSnafu)?;
        BasicDecoder::LE.decode_tag(&buf[..]).context(ReadTagSnafu)
    }
}
