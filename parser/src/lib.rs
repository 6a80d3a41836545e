#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! This crate reads and writes DICOM data sets as byte streams,
//! at two layers of abstraction.
//!
//! - [`stateful`] binds a header decoder or encoder
//!   to a byte source or destination,
//!   and reads or writes primitive values
//!   following their value representation.
//! - [`dataset`] walks a data set as a cursor:
//!   ordered seeking, skipping, nested sequence items,
//!   conversion to a generic tree, and writing of whole data sets.
//! - [`meta`] frames a data set with the file preamble
//!   and the file meta information group.
//!
//! All APIs are based on synchronous I/O.
//!
//! [`dataset`]: ./dataset/index.html
//! [`meta`]: ./meta/index.html
//! [`stateful`]: ./stateful/index.html

pub mod dataset;
pub mod meta;
pub mod stateful;

pub use dataset::read::{DataSetReader, ReadOptions, ValueReadStrategy};
pub use dataset::tree::TreeNode;
pub use dataset::write::{DataSetWriter, SequenceLength, WriteOptions};
pub use meta::FileMetaTable;
pub use stateful::decode::{StatefulDecode, StatefulDecoder};
pub use stateful::encode::StatefulEncoder;
