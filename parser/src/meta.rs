//! File meta information group framing.
//!
//! A DICOM file starts with a 128 byte preamble and the `DICM` magic code,
//! followed by the file meta group (0002,xxxx) in _Explicit VR Little Endian_.
//! The group starts with its own length,
//! and the transfer syntax it names governs the rest of the file.
use crate::dataset::read::{self, DataSetReader, ReadOptions, ValueReadStrategy};
use crate::dataset::write::{self, DataSetWriter};
use crate::stateful::decode::StatefulDecoder;
use crate::stateful::encode::StatefulEncoder;
use dcmio_core::dcm_value;
use dcmio_core::header::{Length, Tag};
use dcmio_core::{DataElement, DataSet, PrimitiveValue, VR};
use dcmio_dictionary_std::tags;
use dcmio_encoding::decode::{self, Decode};
use dcmio_encoding::transfer_syntax::{TransferSyntaxIndex, TransferSyntaxRegistry};
use dcmio_encoding::TransferSyntax;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::io::{self, Read, Write};
use tracing::warn;

const DICM_MAGIC_CODE: [u8; 4] = [b'D', b'I', b'C', b'M'];

/// The size of the file preamble, in bytes.
pub const PREAMBLE_LENGTH: usize = 128;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The file preamble could not be read.
    #[snafu(display("Could not read the file preamble"))]
    ReadPreamble {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// The file meta group parser could not read
    /// the magic code `DICM` from its source.
    #[snafu(display("Could not start reading DICOM data"))]
    ReadMagicCode {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Invalid DICOM data, detected from checking the `DICM` code.
    #[snafu(display("Invalid DICOM data"))]
    NotDicom { backtrace: Backtrace },

    /// The header of the group length element could not be decoded.
    #[snafu(display("Could not decode the file meta group length"))]
    DecodeGroupLength {
        #[snafu(backtrace)]
        source: decode::Error,
    },

    /// The value of the group length element could not be read.
    #[snafu(display("Could not read the file meta group length"))]
    ReadGroupLength {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// A data element with an unexpected tag was retrieved:
    /// the parser was expecting the group length first.
    #[snafu(display("Unexpected data element tagged {}", tag))]
    UnexpectedTag { tag: Tag, backtrace: Backtrace },

    /// The value length of a data element in the file meta group
    /// was unexpected.
    #[snafu(display("Unexpected length {} for data element tagged {}", length, tag))]
    UnexpectedDataValueLength {
        tag: Tag,
        length: Length,
        backtrace: Backtrace,
    },

    /// The elements of the file meta group could not be read.
    #[snafu(display("Could not read the file meta group"))]
    ReadGroup {
        #[snafu(backtrace)]
        source: read::Error,
    },

    /// A required file meta data element is missing.
    #[snafu(display("Missing data element `{}`", alias))]
    MissingElement {
        alias: &'static str,
        backtrace: Backtrace,
    },

    /// The file meta group could not be written.
    #[snafu(display("Could not write the file meta group"))]
    WriteGroup {
        #[snafu(backtrace)]
        source: write::Error,
    },

    /// The preamble or magic code could not be written.
    #[snafu(display("Could not write the file preamble"))]
    WritePreamble {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// The length of the file meta group cannot be determined.
    #[snafu(display("Length of the file meta group cannot be determined"))]
    UndeterminedGroupLength { backtrace: Backtrace },

    /// The transfer syntax of the file is not supported.
    #[snafu(display("Unsupported transfer syntax {}", uid))]
    UnsupportedTransferSyntax { uid: String, backtrace: Backtrace },

    /// The main data set could not be read.
    #[snafu(display("Could not read the data set"))]
    ReadDataSet {
        #[snafu(backtrace)]
        source: read::Error,
    },

    /// The main data set could not be written.
    #[snafu(display("Could not write the data set"))]
    WriteDataSet {
        #[snafu(backtrace)]
        source: write::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// DICOM File Meta Information Table.
///
/// This data type contains the relevant parts of the file meta information table, as
/// specified in [1].
///
/// [1]: http://dicom.nema.org/medical/dicom/current/output/chtml/part06/chapter_7.html
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaTable {
    /// File Meta Information Group Length
    pub information_group_length: u32,
    /// File Meta Information Version
    pub information_version: [u8; 2],
    /// Media Storage SOP Class UID
    pub media_storage_sop_class_uid: String,
    /// Media Storage SOP Instance UID
    pub media_storage_sop_instance_uid: String,
    /// Transfer Syntax UID
    pub transfer_syntax: String,
    /// Implementation Class UID
    pub implementation_class_uid: String,

    /// Implementation Version Name
    pub implementation_version_name: Option<String>,
    /// Source Application Entity Title
    pub source_application_entity_title: Option<String>,
}

impl FileMetaTable {
    /// Read the file meta group from a source positioned
    /// right at the `DICM` magic code, after the preamble.
    pub fn from_reader<R: Read>(file: R) -> Result<Self> {
        FileMetaTable::read_from(file)
    }

    fn read_from<S: Read>(mut file: S) -> Result<Self> {
        let mut buff: [u8; 4] = [0; 4];
        file.read_exact(&mut buff).context(ReadMagicCodeSnafu)?;
        ensure!(buff == DICM_MAGIC_CODE, NotDicomSnafu);

        let (header, _) = decode::file_header_decoder()
            .decode_header(&mut file)
            .context(DecodeGroupLengthSnafu)?;
        ensure!(
            header.tag == tags::FILE_META_INFORMATION_GROUP_LENGTH,
            UnexpectedTagSnafu { tag: header.tag }
        );
        ensure!(
            header.len.get() == Some(4),
            UnexpectedDataValueLengthSnafu {
                tag: header.tag,
                length: header.len,
            }
        );
        file.read_exact(&mut buff).context(ReadGroupLengthSnafu)?;
        let group_length = u32::from_le_bytes(buff);

        // the rest of the group, and nothing more
        let mut group = file.take(u64::from(group_length));
        let mut parser = StatefulDecoder::file_header_parser(&mut group).with_position(16);
        let options = ReadOptions::default().value_read(ValueReadStrategy::Preserved);
        let dataset = DataSetReader::new(&mut parser, options)
            .read_dataset()
            .context(ReadGroupSnafu)?;

        let mut builder = FileMetaTableBuilder::new().group_length(group_length);
        for element in dataset {
            if element.tag().group() != 0x0002 {
                warn!("Unexpected element {} in file meta group", element.tag());
                continue;
            }
            let text = || element.to_str().map(|s| s.into_owned()).unwrap_or_default();
            builder = match element.tag() {
                tags::FILE_META_INFORMATION_VERSION => {
                    match element.value().primitive().map(PrimitiveValue::uint8_slice) {
                        Some(Ok(&[a, b])) => builder.information_version([a, b]),
                        _ => {
                            return UnexpectedDataValueLengthSnafu {
                                tag: element.tag(),
                                length: Length(element.value().multiplicity() as u32),
                            }
                            .fail()
                        }
                    }
                }
                tags::MEDIA_STORAGE_SOP_CLASS_UID => builder.media_storage_sop_class_uid(text()),
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID => {
                    builder.media_storage_sop_instance_uid(text())
                }
                tags::TRANSFER_SYNTAX_UID => builder.transfer_syntax(text()),
                tags::IMPLEMENTATION_CLASS_UID => builder.implementation_class_uid(text()),
                tags::IMPLEMENTATION_VERSION_NAME => builder.implementation_version_name(text()),
                tags::SOURCE_APPLICATION_ENTITY_TITLE => {
                    builder.source_application_entity_title(text())
                }
                // other attributes of the group are not kept
                _ => builder,
            };
        }
        builder.build()
    }

    /// The elements of the group after the group length, in tag order.
    fn to_dataset(&self) -> DataSet {
        let mut dataset = DataSet::new();
        dataset.put_value(
            tags::FILE_META_INFORMATION_VERSION,
            VR::OB,
            dcm_value!(U8, [self.information_version[0], self.information_version[1]]),
        );
        dataset.put_value(
            tags::MEDIA_STORAGE_SOP_CLASS_UID,
            VR::UI,
            self.media_storage_sop_class_uid.as_str(),
        );
        dataset.put_value(
            tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
            VR::UI,
            self.media_storage_sop_instance_uid.as_str(),
        );
        dataset.put_value(tags::TRANSFER_SYNTAX_UID, VR::UI, self.transfer_syntax.as_str());
        dataset.put_value(
            tags::IMPLEMENTATION_CLASS_UID,
            VR::UI,
            self.implementation_class_uid.as_str(),
        );
        if let Some(v) = &self.implementation_version_name {
            dataset.put_value(tags::IMPLEMENTATION_VERSION_NAME, VR::SH, v.as_str());
        }
        if let Some(v) = &self.source_application_entity_title {
            dataset.put_value(tags::SOURCE_APPLICATION_ENTITY_TITLE, VR::AE, v.as_str());
        }
        dataset
    }

    /// Calculate the group length of this table,
    /// which is the encoded length of all its elements
    /// after the group length element itself.
    pub fn calculate_group_length(&self) -> Option<u32> {
        DataSetWriter::from_encoder(StatefulEncoder::file_header_printer(io::sink()))
            .dataset_length(&self.to_dataset())
    }

    /// Write the file meta group, starting with the group length,
    /// which is recalculated from the current contents of the table.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let group = self.to_dataset();
        let mut dset = DataSetWriter::from_encoder(StatefulEncoder::file_header_printer(writer));
        let group_length = dset
            .dataset_length(&group)
            .context(UndeterminedGroupLengthSnafu)?;
        dset.write_element(&DataElement::new(
            tags::FILE_META_INFORMATION_GROUP_LENGTH,
            VR::UL,
            dcm_value!(U32, group_length),
        ))
        .context(WriteGroupSnafu)?;
        dset.write_dataset(&group).context(WriteGroupSnafu)
    }

    /// Look up the transfer syntax of the file in the built-in registry.
    pub fn transfer_syntax(&self) -> Result<&'static TransferSyntax> {
        TransferSyntaxRegistry
            .get(&self.transfer_syntax)
            .context(UnsupportedTransferSyntaxSnafu {
                uid: self.transfer_syntax.as_str(),
            })
    }
}

/// A builder for DICOM meta information tables.
#[derive(Debug, Default, Clone)]
pub struct FileMetaTableBuilder {
    /// File Meta Information Group Length (UL)
    information_group_length: Option<u32>,
    /// File Meta Information Version (OB)
    information_version: Option<[u8; 2]>,
    /// Media Storage SOP Class UID (UI)
    media_storage_sop_class_uid: Option<String>,
    /// Media Storage SOP Instance UID (UI)
    media_storage_sop_instance_uid: Option<String>,
    /// Transfer Syntax UID (UI)
    transfer_syntax: Option<String>,
    /// Implementation Class UID (UI)
    implementation_class_uid: Option<String>,

    /// Implementation Version Name (SH)
    implementation_version_name: Option<String>,
    /// Source Application Entity Title (AE)
    source_application_entity_title: Option<String>,
}

impl FileMetaTableBuilder {
    /// Create a new, empty builder.
    pub fn new() -> FileMetaTableBuilder {
        FileMetaTableBuilder::default()
    }

    /// Define the meta information group length.
    /// When left undefined, it is calculated on build.
    pub fn group_length(mut self, value: u32) -> FileMetaTableBuilder {
        self.information_group_length = Some(value);
        self
    }

    /// Define the meta information version.
    pub fn information_version(mut self, value: [u8; 2]) -> FileMetaTableBuilder {
        self.information_version = Some(value);
        self
    }

    /// Define the media storage SOP class UID.
    pub fn media_storage_sop_class_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_class_uid = Some(value.into());
        self
    }

    /// Define the media storage SOP instance UID.
    pub fn media_storage_sop_instance_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_instance_uid = Some(value.into());
        self
    }

    /// Define the transfer syntax UID.
    pub fn transfer_syntax<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.transfer_syntax = Some(value.into());
        self
    }

    /// Define the implementation class UID.
    pub fn implementation_class_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.implementation_class_uid = Some(value.into());
        self
    }

    /// Define the implementation version name.
    pub fn implementation_version_name<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.implementation_version_name = Some(value.into());
        self
    }

    /// Define the source application entity title.
    pub fn source_application_entity_title<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.source_application_entity_title = Some(value.into());
        self
    }

    /// Build the table.
    pub fn build(self) -> Result<FileMetaTable> {
        // assume (00H, 01H) when missing
        let information_version = self.information_version.unwrap_or([0, 1]);
        let media_storage_sop_class_uid =
            self.media_storage_sop_class_uid
                .context(MissingElementSnafu {
                    alias: "MediaStorageSOPClassUID",
                })?;
        let media_storage_sop_instance_uid =
            self.media_storage_sop_instance_uid
                .context(MissingElementSnafu {
                    alias: "MediaStorageSOPInstanceUID",
                })?;
        let transfer_syntax = self.transfer_syntax.context(MissingElementSnafu {
            alias: "TransferSyntaxUID",
        })?;
        let implementation_class_uid =
            self.implementation_class_uid
                .context(MissingElementSnafu {
                    alias: "ImplementationClassUID",
                })?;

        let mut table = FileMetaTable {
            information_group_length: self.information_group_length.unwrap_or(0),
            information_version,
            media_storage_sop_class_uid,
            media_storage_sop_instance_uid,
            transfer_syntax,
            implementation_class_uid,
            implementation_version_name: self.implementation_version_name,
            source_application_entity_title: self.source_application_entity_title,
        };
        if self.information_group_length.is_none() {
            table.information_group_length = table
                .calculate_group_length()
                .context(UndeterminedGroupLengthSnafu)?;
        }
        Ok(table)
    }
}

/// Read a whole DICOM file:
/// the preamble, the file meta group, and the main data set
/// in the transfer syntax declared by the meta group.
pub fn read_file<R: Read>(mut source: R) -> Result<(FileMetaTable, DataSet)> {
    let mut preamble = [0u8; PREAMBLE_LENGTH];
    source
        .read_exact(&mut preamble)
        .context(ReadPreambleSnafu)?;
    let meta = FileMetaTable::from_reader(&mut source)?;
    let ts = meta.transfer_syntax()?;

    let position = 132 + 12 + u64::from(meta.information_group_length);
    let mut parser = StatefulDecoder::new(&mut source, ts).with_position(position);
    let dataset = DataSetReader::new(&mut parser, ReadOptions::default())
        .read_dataset()
        .context(ReadDataSetSnafu)?;
    Ok((meta, dataset))
}

/// Write a whole DICOM file:
/// a zeroed preamble, the file meta group, and the main data set
/// in the transfer syntax declared by the meta group.
pub fn write_file<W: Write>(mut to: W, meta: &FileMetaTable, dataset: &DataSet) -> Result<()> {
    let ts = meta.transfer_syntax()?;
    to.write_all(&[0; PREAMBLE_LENGTH])
        .context(WritePreambleSnafu)?;
    to.write_all(&DICM_MAGIC_CODE)
        .context(WritePreambleSnafu)?;
    meta.write(&mut to)?;
    DataSetWriter::new(&mut to, ts)
        .write_dataset(dataset)
        .context(WriteDataSetSnafu)
}

#[cfg(test)]
mod tests {
    use super::{FileMetaTable, FileMetaTableBuilder};
    use dcmio_dictionary_std::uids;

    #[rustfmt::skip]
    const TEST_META_1: &[u8] = &[
        // magic code
        b'D', b'I', b'C', b'M',
        // File Meta Information Group Length: (0002,0000) ; UL ; 4 ; 108
        0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 0x6c, 0x00, 0x00, 0x00,
        // File Meta Information Version: (0002, 0001) ; OB ; 2 ; [0x00, 0x01]
        0x02, 0x00, 0x01, 0x00, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01,
        // Media Storage SOP Class UID (0002,0002) ; UI ; 26 ; "1.2.840.10008.5.1.4.1.1.1\0"
        0x02, 0x00, 0x02, 0x00, b'U', b'I', 0x1a, 0x00,
        b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8', b'.',
        b'5', b'.', b'1', b'.', b'4', b'.', b'1', b'.', b'1', b'.', b'1', 0x00,
        // Media Storage SOP Instance UID (0002,0003) ; UI ; 8 ; "1.2.3.4\0"
        0x02, 0x00, 0x03, 0x00, b'U', b'I', 0x08, 0x00,
        b'1', b'.', b'2', b'.', b'3', b'.', b'4', 0x00,
        // Transfer Syntax UID (0002,0010) ; UI ; 20 ; "1.2.840.10008.1.2.1\0"
        0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00,
        b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8', b'.',
        b'1', b'.', b'2', b'.', b'1', 0x00,
        // Implementation Class UID (0002,0012) ; UI ; 8 ; "1.2.345\0"
        0x02, 0x00, 0x12, 0x00, b'U', b'I', 0x08, 0x00,
        b'1', b'.', b'2', b'.', b'3', b'4', b'5', 0x00,
    ];

    #[test]
    fn read_meta_table_from_reader() {
        let mut source = TEST_META_1;
        let table = FileMetaTable::from_reader(&mut source).unwrap();

        let expected = FileMetaTableBuilder::new()
            .group_length(108)
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.1")
            .media_storage_sop_instance_uid("1.2.3.4")
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .implementation_class_uid("1.2.345")
            .build()
            .unwrap();
        assert_eq!(table, expected);
        assert!(source.is_empty());
    }

    #[test]
    fn write_meta_table() {
        let table = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.1")
            .media_storage_sop_instance_uid("1.2.3.4")
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .implementation_class_uid("1.2.345")
            .build()
            .unwrap();
        assert_eq!(table.information_group_length, 108);

        let mut out = Vec::new();
        table.write(&mut out).unwrap();
        assert_eq!(&out[..], &TEST_META_1[4..]);
    }

    #[test]
    fn not_dicom() {
        let mut source: &[u8] = b"DICN";
        assert!(matches!(
            FileMetaTable::from_reader(&mut source),
            Err(super::Error::NotDicom { .. })
        ));
    }
}
