//! Stateful decoding and encoding of DICOM content,
//! tracking the number of bytes consumed or produced.
pub mod decode;
pub mod encode;
