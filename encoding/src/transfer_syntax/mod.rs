//! Transfer syntax descriptors.
//!
//! A [`TransferSyntax`] states how the data set after the file meta group
//! is laid out: the byte order, whether VRs are explicit,
//! and whether pixel data is encapsulated.
//! It produces the matching header decoder and encoder at run-time.
//!
//! The descriptors known to this crate are gathered in the
//! [`TransferSyntaxRegistry`], which implements [`TransferSyntaxIndex`].
//! Encapsulated transfer syntaxes are known so that their data sets can be
//! parsed; their pixel data fragments are passed through as-is.

use crate::decode::basic::BasicDecoder;
use crate::decode::explicit::ExplicitVRDecoder;
use crate::decode::implicit_le::StandardImplicitVRLittleEndianDecoder;
use crate::decode::ElementDecoder;
use crate::encode::basic::BasicEncoder;
use crate::encode::explicit::ExplicitVREncoder;
use crate::encode::implicit_le::ImplicitVRLittleEndianEncoder;
use crate::encode::ElementEncoder;
use dcmio_dictionary_std::uids;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub use byteordered::Endianness;

/// A DICOM transfer syntax specifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// How pixel data is held.
    codec: Codec,
}

/// Description of the pixel data encoding of a transfer syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Pixel data is stored natively in the data set.
    Native,
    /// Pixel data is a sequence of compressed fragments.
    /// The data set itself is not compressed.
    EncapsulatedPixelData,
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        codec: Codec,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            codec,
        }
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Whether value representations are written in element headers.
    pub const fn is_explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Obtain the pixel data codec description.
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Whether pixel data is encapsulated in fragments.
    pub fn is_encapsulated(&self) -> bool {
        self.codec == Codec::EncapsulatedPixelData
    }

    /// Obtain the data element header decoder of this transfer syntax.
    pub fn decoder(&self) -> ElementDecoder {
        match (self.explicit_vr, self.byte_order) {
            (false, _) => ElementDecoder::ImplicitVRLittleEndian(
                StandardImplicitVRLittleEndianDecoder::default(),
            ),
            (true, Endianness::Little) => {
                ElementDecoder::ExplicitVR(ExplicitVRDecoder::little_endian())
            }
            (true, Endianness::Big) => ElementDecoder::ExplicitVR(ExplicitVRDecoder::big_endian()),
        }
    }

    /// Obtain the data element header encoder of this transfer syntax.
    pub fn encoder(&self) -> ElementEncoder {
        match (self.explicit_vr, self.byte_order) {
            (false, _) => ElementEncoder::ImplicitVRLittleEndian(ImplicitVRLittleEndianEncoder),
            (true, Endianness::Little) => {
                ElementEncoder::ExplicitVR(ExplicitVREncoder::little_endian())
            }
            (true, Endianness::Big) => ElementEncoder::ExplicitVR(ExplicitVREncoder::big_endian()),
        }
    }

    /// Obtain a decoder of binary values in this transfer syntax' byte order.
    pub fn basic_decoder(&self) -> BasicDecoder {
        BasicDecoder::from(self.byte_order)
    }

    /// Obtain an encoder of binary values in this transfer syntax' byte order.
    pub fn basic_encoder(&self) -> BasicEncoder {
        BasicEncoder::from(self.byte_order)
    }
}

/// Implicit VR Little Endian, the default transfer syntax.
pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new(
    uids::IMPLICIT_VR_LITTLE_ENDIAN,
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
    Codec::Native,
);

/// Explicit VR Little Endian.
pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax::new(
    uids::EXPLICIT_VR_LITTLE_ENDIAN,
    "Explicit VR Little Endian",
    Endianness::Little,
    true,
    Codec::Native,
);

/// Explicit VR Big Endian (retired).
pub const EXPLICIT_VR_BIG_ENDIAN: TransferSyntax = TransferSyntax::new(
    uids::EXPLICIT_VR_BIG_ENDIAN,
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
    Codec::Native,
);

const fn encapsulated(uid: &'static str, name: &'static str) -> TransferSyntax {
    TransferSyntax::new(
        uid,
        name,
        Endianness::Little,
        true,
        Codec::EncapsulatedPixelData,
    )
}

static BUILT_IN: [TransferSyntax; 11] = [
    IMPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_BIG_ENDIAN,
    encapsulated(uids::JPEG_BASELINE8_BIT, "JPEG Baseline (Process 1)"),
    encapsulated(uids::JPEG_EXTENDED12_BIT, "JPEG Extended (Process 2 & 4)"),
    encapsulated(
        uids::JPEG_LOSSLESS_SV1,
        "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
    ),
    encapsulated(uids::JPEGLS_LOSSLESS, "JPEG-LS Lossless"),
    encapsulated(uids::JPEGLS_NEAR_LOSSLESS, "JPEG-LS Lossy (Near-Lossless)"),
    encapsulated(uids::JPEG2000_LOSSLESS, "JPEG 2000 (Lossless Only)"),
    encapsulated(uids::JPEG2000, "JPEG 2000"),
    encapsulated(uids::RLE_LOSSLESS, "RLE Lossless"),
];

/// Trait for containers of transfer syntax specifiers.
pub trait TransferSyntaxIndex {
    /// Obtain a DICOM transfer syntax by its respective UID.
    ///
    /// Implementations of this method should be robust to the possible
    /// presence of trailing padding (`\0` or space) in `uid`.
    fn get(&self, uid: &str) -> Option<&'static TransferSyntax>;
}

impl<T: ?Sized> TransferSyntaxIndex for &T
where
    T: TransferSyntaxIndex,
{
    fn get(&self, uid: &str) -> Option<&'static TransferSyntax> {
        (**self).get(uid)
    }
}

/// The index of the transfer syntaxes known to this crate.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct TransferSyntaxRegistry;

static REGISTRY: Lazy<HashMap<&'static str, &'static TransferSyntax>> =
    Lazy::new(|| BUILT_IN.iter().map(|ts| (ts.uid(), ts)).collect());

impl TransferSyntaxRegistry {
    /// Iterate over all known transfer syntaxes.
    pub fn iter(&self) -> impl Iterator<Item = &'static TransferSyntax> {
        BUILT_IN.iter()
    }
}

impl TransferSyntaxIndex for TransferSyntaxRegistry {
    fn get(&self, uid: &str) -> Option<&'static TransferSyntax> {
        let uid = uid.trim_end_matches(|c: char| c == '\0' || c == ' ');
        REGISTRY.get(uid).copied()
    }
}

/// Look up a transfer syntax by UID in the built-in registry.
pub fn get(uid: &str) -> Option<&'static TransferSyntax> {
    TransferSyntaxRegistry.get(uid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Decode;

    #[test]
    fn lookup_with_padding() {
        let ts = get("1.2.840.10008.1.2.1\0").expect("should be known");
        assert_eq!(ts.name(), "Explicit VR Little Endian");
        assert!(ts.is_explicit_vr());
        assert!(!ts.is_encapsulated());

        let ts = get("1.2.840.10008.1.2.4.50").expect("should be known");
        assert!(ts.is_encapsulated());
        assert_eq!(ts.endianness(), Endianness::Little);

        assert!(get("1.2.3.4").is_none());
        assert_eq!(TransferSyntaxRegistry.iter().count(), 11);
    }

    #[test]
    fn decoders_follow_descriptor() {
        assert!(!IMPLICIT_VR_LITTLE_ENDIAN.decoder().is_explicit_vr());
        let dec = EXPLICIT_VR_BIG_ENDIAN.decoder();
        assert_eq!(dec.endianness(), Endianness::Big);
        let raw: &[u8] = &[0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02];
        let (header, _) = dec.decode_header(&mut &raw[..]).unwrap();
        assert_eq!(header.len.0, 2);
    }
}
