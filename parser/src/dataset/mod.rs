//! Reading and writing of DICOM data sets.
//!
//! [`read::DataSetReader`] is a cursor over the elements of a data set,
//! [`write::DataSetWriter`] writes elements and whole data sets,
//! and [`tree`] turns a data set into a serializable tree of nodes.

pub mod read;
pub mod tree;
pub mod write;

pub use self::read::DataSetReader;
pub use self::tree::TreeNode;
pub use self::write::DataSetWriter;
