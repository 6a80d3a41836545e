//! This module contains the data set writer,
//! the dual of the data set reader.
//!
//! The writer emits whole elements, sequences, and data sets
//! in a transfer syntax and keeps track of the specific character set,
//! which changes when _Specific Character Set_ is written.
//! Lengths of sequences and items are either undefined
//! (closed by delimiters) or precomputed, according to [`WriteOptions`].
use crate::stateful::encode::{value_length, Error as EncoderError, StatefulEncoder};
use dcmio_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dcmio_core::header::{DataElementHeader, Length, Tag};
use dcmio_core::value::{PixelFragmentSequence, PrimitiveValue, Value};
use dcmio_core::{DataElement, DataSet, VR};
use dcmio_dictionary_std::StandardDataDictionary;
use dcmio_encoding::text::{CharacterSetError, SpecificCharacterSet};
use dcmio_encoding::TransferSyntax;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::convert::TryFrom;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not write element {}", tag))]
    WriteElement {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncoderError,
    },
    #[snafu(display("Could not write item of sequence {}", tag))]
    WriteItem {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncoderError,
    },
    #[snafu(display("Length of {} cannot be determined in advance", tag))]
    UndeterminedLength { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Fragment of {} is too long ({} bytes)", tag, len))]
    ValueTooLong {
        tag: Tag,
        len: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not resolve the specific character set"))]
    UnsupportedCharacterSet {
        #[snafu(backtrace)]
        source: CharacterSetError,
    },
    #[snafu(display("No value representation is known for attribute {}", tag))]
    NoMatchingVr { tag: Tag, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// How to write the length of sequences or of sequence items.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum SequenceLength {
    /// Undefined length, followed by a delimiter.
    Undefined,
    /// Defined length, computed before writing.
    /// Writing fails if the length cannot be determined in advance,
    /// such as for text in a character set with escape sequences.
    Defined,
    /// Defined length where it can be determined in advance,
    /// undefined length otherwise.
    DefinedIfPossible,
}

impl Default for SequenceLength {
    fn default() -> Self {
        SequenceLength::Undefined
    }
}

/// The set of options for the data set writer.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
    /// how to write the length of sequence elements
    pub sequence_length: SequenceLength,
    /// how to write the length of sequence items
    pub item_length: SequenceLength,
}

impl WriteOptions {
    /// Replace the sequence length strategy of the options.
    pub fn sequence_length(mut self, sequence_length: SequenceLength) -> Self {
        self.sequence_length = sequence_length;
        self
    }

    /// Replace the item length strategy of the options.
    pub fn item_length(mut self, item_length: SequenceLength) -> Self {
        self.item_length = item_length;
        self
    }
}

/// A stateful device for printing a DICOM data set in sequential order.
/// This is the counterpart of [`DataSetReader`](super::read::DataSetReader)
/// for turning data elements into bytes.
#[derive(Debug)]
pub struct DataSetWriter<W> {
    printer: StatefulEncoder<W>,
    options: WriteOptions,
    charset: SpecificCharacterSet,
}

impl<W> DataSetWriter<W> {
    /// Create a writer for data sets in the given transfer syntax.
    pub fn new(to: W, ts: &TransferSyntax) -> Self {
        Self::from_encoder(StatefulEncoder::new(to, ts))
    }

    /// Create a writer over an existing stateful encoder.
    pub fn from_encoder(printer: StatefulEncoder<W>) -> Self {
        DataSetWriter {
            printer,
            options: WriteOptions::default(),
            charset: SpecificCharacterSet::default(),
        }
    }

    /// Replace the options of the writer.
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the initial specific character set of the writer.
    pub fn with_charset(mut self, charset: SpecificCharacterSet) -> Self {
        self.charset = charset;
        self
    }

    /// The specific character set currently in effect.
    pub fn charset(&self) -> &SpecificCharacterSet {
        &self.charset
    }

    /// The number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.printer.bytes_written()
    }

    /// Recover the inner writer.
    pub fn into_inner(self) -> W {
        self.printer.into_inner()
    }

    /// Calculate the encoded length of an element, header included,
    /// under the current character set.
    ///
    /// Returns `None` if it cannot be known without encoding.
    pub fn element_length(&self, element: &DataElement) -> Option<u32> {
        let mut charset = self.charset.clone();
        self.element_length_with(element, &mut charset)
            .and_then(to_length)
    }

    /// Calculate the encoded length of all elements of a data set,
    /// as written by [`write_dataset`](Self::write_dataset).
    ///
    /// Returns `None` if it cannot be known without encoding.
    pub fn dataset_length(&self, dataset: &DataSet) -> Option<u32> {
        self.dataset_length_with(dataset, &self.charset)
            .and_then(to_length)
    }

    fn dataset_length_with(&self, dataset: &DataSet, charset: &SpecificCharacterSet) -> Option<u64> {
        let mut charset = charset.clone();
        dataset
            .iter()
            .map(|e| self.element_length_with(e, &mut charset))
            .sum()
    }

    /// The encoded length of an element.
    /// Writing _Specific Character Set_ changes `charset`
    /// for the elements after it.
    fn element_length_with(
        &self,
        element: &DataElement,
        charset: &mut SpecificCharacterSet,
    ) -> Option<u64> {
        let header = u64::from(self.printer.header_length(element.vr()));
        match element.value() {
            Value::Primitive(value) => {
                let len = value_length(element.tag(), element.vr(), value, charset)?;
                if element.tag() == Tag::SPECIFIC_CHARACTER_SET {
                    *charset = SpecificCharacterSet::from_values(&value.to_multi_str()).ok()?;
                }
                Some(header + u64::from(len))
            }
            Value::Sequence(items) => {
                let items_len = self.items_length_with(items, charset)?;
                let delimiter = match self.options.sequence_length {
                    SequenceLength::Undefined => 8,
                    _ => 0,
                };
                Some(header + items_len + delimiter)
            }
            Value::PixelSequence(seq) => {
                let table = 8 + 4 * seq.offset_table.len() as u64;
                let fragments: u64 = seq
                    .fragments
                    .iter()
                    .map(|f| 8 + even(f.len() as u64))
                    .sum();
                Some(header + table + fragments + 8)
            }
        }
    }

    /// The encoded length of the items of a sequence,
    /// excluding the sequence delimiter.
    fn items_length_with(&self, items: &[DataSet], charset: &SpecificCharacterSet) -> Option<u64> {
        let delimiter = match self.options.item_length {
            SequenceLength::Undefined => 8,
            _ => 0,
        };
        items
            .iter()
            .map(|item| {
                self.dataset_length_with(item, charset)
                    .map(|len| 8 + len + delimiter)
            })
            .sum()
    }
}

impl<W> DataSetWriter<W>
where
    W: Write,
{
    /// Write all elements of a data set in tag order.
    pub fn write_dataset(&mut self, dataset: &DataSet) -> Result<()> {
        for element in dataset.iter() {
            self.write_element(element)?;
        }
        Ok(())
    }

    /// Write a data element of any kind of value.
    pub fn write_element(&mut self, element: &DataElement) -> Result<()> {
        match element.value() {
            Value::Primitive(value) => self.write_primitive(element.tag(), element.vr(), value),
            Value::Sequence(items) => self.write_sequence(element.tag(), items),
            Value::PixelSequence(seq) => {
                self.write_pixel_sequence(element.tag(), element.vr(), seq)
            }
        }
    }

    /// Write a primitive data element.
    ///
    /// Writing _Specific Character Set_ switches the character set
    /// of the text values written after it.
    pub fn write_primitive(&mut self, tag: Tag, vr: VR, value: &PrimitiveValue) -> Result<()> {
        let charset = if tag == Tag::SPECIFIC_CHARACTER_SET {
            Some(
                SpecificCharacterSet::from_values(&value.to_multi_str())
                    .context(UnsupportedCharacterSetSnafu)?,
            )
        } else {
            None
        };

        self.printer
            .encode_primitive_element(tag, vr, value, &self.charset)
            .context(WriteElementSnafu { tag })?;

        if let Some(charset) = charset {
            debug!("Specific character set is now {:?}", charset);
            self.charset = charset;
        }
        Ok(())
    }

    /// Write a primitive value for an attribute of the standard dictionary,
    /// in the value representation the dictionary declares.
    /// Ambiguous value representations are written in their default form.
    pub fn write_attribute(&mut self, tag: Tag, value: &PrimitiveValue) -> Result<()> {
        self.write_attribute_with(&StandardDataDictionary, tag, value)
    }

    /// Write a primitive value for an attribute of the given dictionary,
    /// in the value representation the dictionary declares.
    pub fn write_attribute_with<D>(&mut self, dict: &D, tag: Tag, value: &PrimitiveValue) -> Result<()>
    where
        D: DataDictionary,
    {
        let vr = dict
            .by_tag(tag)
            .map(|entry| entry.vr().relaxed())
            .filter(|vr| *vr != VR::SQ)
            .context(NoMatchingVrSnafu { tag })?;
        self.write_primitive(tag, vr, value)
    }

    /// Write a sequence element with the given items.
    ///
    /// Each item starts with the character set in effect before the sequence,
    /// and the sequence does not change the character set after it.
    pub fn write_sequence(&mut self, tag: Tag, items: &[DataSet]) -> Result<()> {
        let len = match self.options.sequence_length {
            SequenceLength::Undefined => None,
            SequenceLength::Defined => Some(
                self.items_length_with(items, &self.charset)
                    .and_then(to_length)
                    .context(UndeterminedLengthSnafu { tag })?,
            ),
            SequenceLength::DefinedIfPossible => self
                .items_length_with(items, &self.charset)
                .and_then(to_length),
        };

        self.printer
            .encode_element_header(DataElementHeader::new(
                tag,
                VR::SQ,
                len.map(Length).unwrap_or(Length::UNDEFINED),
            ))
            .context(WriteElementSnafu { tag })?;

        for item in items {
            self.write_item(tag, item)?;
        }

        if len.is_none() {
            self.printer
                .encode_sequence_delimiter()
                .context(WriteItemSnafu { tag })?;
        }
        Ok(())
    }

    fn write_item(&mut self, tag: Tag, item: &DataSet) -> Result<()> {
        let len = match self.options.item_length {
            SequenceLength::Undefined => None,
            SequenceLength::Defined => Some(
                self.dataset_length(item)
                    .context(UndeterminedLengthSnafu { tag })?,
            ),
            SequenceLength::DefinedIfPossible => self.dataset_length(item),
        };

        self.printer
            .encode_item_header(len.unwrap_or(Length::UNDEFINED.0))
            .context(WriteItemSnafu { tag })?;

        let charset = self.charset.clone();
        let written = self.write_dataset(item);
        self.charset = charset;
        written?;

        if len.is_none() {
            self.printer
                .encode_item_delimiter()
                .context(WriteItemSnafu { tag })?;
        }
        Ok(())
    }

    /// Write encapsulated pixel data as is:
    /// the offset table item, one item per fragment,
    /// and the sequence delimiter.
    pub fn write_pixel_sequence(
        &mut self,
        tag: Tag,
        vr: VR,
        seq: &PixelFragmentSequence,
    ) -> Result<()> {
        self.printer
            .encode_element_header(DataElementHeader::new(tag, vr, Length::UNDEFINED))
            .context(WriteElementSnafu { tag })?;
        self.printer
            .encode_offset_table(&seq.offset_table)
            .context(WriteItemSnafu { tag })?;
        for fragment in &seq.fragments {
            let len = to_length(fragment.len() as u64).context(ValueTooLongSnafu {
                tag,
                len: fragment.len(),
            })?;
            self.printer
                .encode_item_header(len)
                .context(WriteItemSnafu { tag })?;
            self.printer
                .write_bytes(fragment)
                .context(WriteItemSnafu { tag })?;
        }
        self.printer
            .encode_sequence_delimiter()
            .context(WriteItemSnafu { tag })
    }
}

/// Narrow a length to a defined 32-bit length, if it fits.
fn to_length(len: u64) -> Option<u32> {
    u32::try_from(len)
        .ok()
        .filter(|len| Length(*len).is_defined())
}

fn even(len: u64) -> u64 {
    len + (len & 1)
}
