//! Standard DICOM attribute dictionary and constants.
//!
//! - [`data_element`] holds the run-time dictionary,
//!   a singleton behind the unit type [`StandardDataDictionary`].
//!   It covers the file meta group,
//!   the attributes commonly found in composite instances,
//!   the repeating overlay group,
//!   and the pixel data group.
//! - [`tags`] maps each of those attributes to a tag constant.
//! - [`uids`] declares the transfer syntax UIDs.
pub mod data_element;
pub mod tags;
pub mod uids;

pub use data_element::{StandardDataDictionary, StandardDataDictionaryRegistry};
