#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! DICOM encoding and decoding primitives.
//!
//! This crate provides the element header codecs for each of the
//! uncompressed transfer syntaxes, the byte order aware readers and writers
//! of binary numbers, and the text codecs driven by
//! _Specific Character Set_ (0008,0005),
//! including the ISO 2022 code extension techniques used by
//! Japanese, Korean and Chinese data sets.
//!
//! The [transfer syntax] descriptors tie these together,
//! producing the right decoder and encoder at run-time.
//!
//! All APIs are based on synchronous I/O.
//!
//! [transfer syntax]: ./transfer_syntax/index.html

pub mod decode;
pub mod encode;
pub mod text;
pub mod transfer_syntax;

pub use byteordered::Endianness;
pub use decode::Decode;
pub use encode::Encode;
pub use text::{SpecificCharacterSet, TextCodec};
pub use transfer_syntax::TransferSyntax;
