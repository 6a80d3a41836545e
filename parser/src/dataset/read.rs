//! This module contains the data set cursor,
//! a mid-level abstraction for reading DICOM content sequentially.
//!
//! A [`DataSetReader`] reads one element header at a time
//! from a [stateful decoder](crate::stateful::decode::StatefulDecode),
//! and either reads, skips, or recurses into the element's value.
//! Nested readers are created for each sequence item,
//! bounded by the item's length or by its delimiter,
//! and inherit the specific character set of their parent.
use crate::stateful::decode::{Error as DecoderError, StatefulDecode};
use dcmio_core::header::{DataElementHeader, Header, Length, SequenceItemHeader, Tag};
use dcmio_core::value::{PixelFragmentSequence, PrimitiveValue, Value, C};
use dcmio_core::{DataElement, DataSet, VR};
use dcmio_encoding::text::{CharacterSetError, SpecificCharacterSet};
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not read element header"))]
    ReadHeader {
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display("Could not read item header at position {}", position))]
    ReadItemHeader {
        position: u64,
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display("Could not read value of element {}", tag))]
    ReadValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display("Could not skip value of element {}", tag))]
    SkipValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display("Unexpected tag {} at position {}", tag, position))]
    UnexpectedTag {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Unexpected delimiter {} at position {}", tag, position))]
    UnexpectedDelimiter {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Inconsistent sequence end: expected end at {} bytes but read {}",
        end_of_sequence,
        bytes_read
    ))]
    InconsistentSequenceEnd {
        end_of_sequence: u64,
        bytes_read: u64,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Element {} in the pixel data group must not be skipped before pixel data",
        tag
    ))]
    PixelDataGroupViolation { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Could not resolve the specific character set"))]
    UnsupportedCharacterSet {
        #[snafu(backtrace)]
        source: CharacterSetError,
    },
    #[snafu(display(
        "Value of element {} with undefined length has {} chunks, expected one",
        tag,
        count
    ))]
    MultiChunkValue {
        tag: Tag,
        count: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Element header {} is still open", tag))]
    HeaderAlreadyOpen { tag: Tag, backtrace: Backtrace },
    #[snafu(display("No element header is open"))]
    NoOpenHeader { backtrace: Backtrace },
    #[snafu(display(
        "Element {} ({}) at position {} cannot have undefined length",
        tag,
        vr,
        position
    ))]
    UndefinedLength {
        tag: Tag,
        vr: VR,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Element {} ({}) is not a sequence", tag, vr))]
    NotASequence {
        tag: Tag,
        vr: VR,
        backtrace: Backtrace,
    },
    #[snafu(display("Data ended prematurely at position {}", position))]
    PrematureEnd { position: u64, backtrace: Backtrace },
    /// Undefined pixel item length
    UndefinedItemLength { backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The value reading strategy for the data set reader.
///
/// It defines how the `PrimitiveValue`s read from the source are constructed.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ValueReadStrategy {
    /// Textual values will be decoded according to their value representation.
    ///
    /// Word-sized binary values are read according to
    /// the expected byte order.
    /// String numbers (IS, DS) are converted into binary representations.
    /// For the case of decimals, this may introduce precision errors.
    Interpreted,
    /// Values will be stored without decoding textual numbers.
    ///
    /// Word-sized binary values are read according to
    /// the expected byte order.
    /// Numbers are kept in their original string representation.
    /// All text is still decoded into Rust string values,
    /// in accordance to the specific character set in effect.
    Preserved,
    /// All primitive values are fetched as raw byte buffers,
    /// without any form of decoding or interpretation.
    /// Not even byte order conversions are made.
    ///
    /// This strategy is not recommended,
    /// as it makes the retrieval of important textual data more difficult.
    Raw,
}

impl Default for ValueReadStrategy {
    fn default() -> Self {
        ValueReadStrategy::Interpreted
    }
}

/// The set of options for the data set reader.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct ReadOptions {
    /// the value reading strategy
    pub value_read: ValueReadStrategy,
}

impl ReadOptions {
    /// Replace the value reading strategy of the options.
    pub fn value_read(mut self, value_read: ValueReadStrategy) -> Self {
        self.value_read = value_read;
        self
    }
}

/// Where the data set of a reader ends.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Scope {
    /// The root data set, which ends with the source.
    Root,
    /// An item of defined length, which ends at this position.
    Defined { end: u64 },
    /// An item of undefined length, which ends with an item delimiter.
    Undefined,
}

/// A cursor over a DICOM data set in a byte source.
///
/// At most one element header is open at a time:
/// a header is opened by [`read_header`](Self::read_header)
/// or [`try_seek`](Self::try_seek),
/// and closed by reading or skipping its value.
///
/// Data sets are expected in ascending tag order,
/// which lets the reader seek forward to a tag in a single pass.
#[derive(Debug)]
pub struct DataSetReader<'a, D: ?Sized> {
    /// the stateful decoder, shared with nested readers
    parser: &'a mut D,
    /// the options of this reader
    options: ReadOptions,
    /// the character set of text values read from here on
    charset: SpecificCharacterSet,
    /// where this data set ends
    scope: Scope,
    /// the header read but not yet consumed
    header: Option<DataElementHeader>,
    /// the tag of the last header read
    last_tag: Option<Tag>,
    /// whether the end of the data set was reached
    done: bool,
}

impl<'a, D> DataSetReader<'a, D>
where
    D: ?Sized + StatefulDecode,
{
    /// Create a reader over the root data set in the decoder's source,
    /// under the default character repertoire.
    pub fn new(parser: &'a mut D, options: ReadOptions) -> Self {
        DataSetReader {
            parser,
            options,
            charset: SpecificCharacterSet::default(),
            scope: Scope::Root,
            header: None,
            last_tag: None,
            done: false,
        }
    }

    /// Replace the initial specific character set of the reader.
    pub fn with_charset(mut self, charset: SpecificCharacterSet) -> Self {
        self.charset = charset;
        self
    }

    /// The specific character set currently in effect.
    pub fn charset(&self) -> &SpecificCharacterSet {
        &self.charset
    }

    /// The currently open element header, if any.
    pub fn header(&self) -> Option<&DataElementHeader> {
        self.header.as_ref()
    }

    /// The options of this reader.
    pub fn options(&self) -> ReadOptions {
        self.options
    }

    /// The number of bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.parser.position()
    }

    /// Read the next element header and leave it open.
    ///
    /// Returns `None` at the end of the data set:
    /// the end of the source for the root data set,
    /// the item boundary or the item delimiter for nested data sets.
    ///
    /// # Errors
    ///
    /// Fails with [`HeaderAlreadyOpen`](Error::HeaderAlreadyOpen)
    /// if the value of the previous header was not consumed.
    pub fn read_header(&mut self) -> Result<Option<DataElementHeader>> {
        if let Some(header) = self.header {
            return HeaderAlreadyOpenSnafu { tag: header.tag }.fail();
        }
        if self.done {
            return Ok(None);
        }

        let position = self.parser.position();
        if let Scope::Defined { end } = self.scope {
            ensure!(
                position <= end,
                InconsistentSequenceEndSnafu {
                    end_of_sequence: end,
                    bytes_read: position,
                }
            );
            let remaining = end - position;
            if remaining == 0 {
                self.done = true;
                return Ok(None);
            }
            if remaining < 8 {
                warn!(
                    "Skipping {} trailing bytes at the end of item (position {})",
                    remaining, position
                );
                // remaining is below 8
                self.parser
                    .skip_bytes(remaining as u32)
                    .context(ReadHeaderSnafu)?;
                self.done = true;
                return Ok(None);
            }
        }

        let header = match self.parser.decode_header().context(ReadHeaderSnafu)? {
            Some(header) => header,
            None if self.scope == Scope::Root => {
                self.done = true;
                return Ok(None);
            }
            None => return PrematureEndSnafu { position }.fail(),
        };

        match header.tag {
            Tag::ITEM_DELIMITER if self.scope == Scope::Undefined => {
                self.done = true;
                return Ok(None);
            }
            Tag::ITEM => {
                return UnexpectedTagSnafu {
                    tag: header.tag,
                    position,
                }
                .fail()
            }
            tag if tag.is_delimitation_item() => {
                return UnexpectedDelimiterSnafu { tag, position }.fail()
            }
            _ => {}
        }
        ensure!(
            !header.len.is_undefined() || header.vr.allows_undefined_length(),
            UndefinedLengthSnafu {
                tag: header.tag,
                vr: header.vr,
                position,
            }
        );

        if let Some(last) = self.last_tag {
            if header.tag <= last {
                warn!("Element {} out of order, after {}", header.tag, last);
            }
        }
        self.last_tag = Some(header.tag);
        self.header = Some(header);
        Ok(Some(header))
    }

    /// Advance to the element with the given tag.
    ///
    /// Returns `true` with the element's header open if it was found.
    /// Returns `false` if the data set ended,
    /// or if an element with a greater tag was reached first,
    /// in which case that header is left open.
    /// Elements before the target are skipped.
    ///
    /// # Errors
    ///
    /// Any element in the pixel data group other than _Pixel Data_ itself
    /// cannot be skipped over,
    /// and fails with [`PixelDataGroupViolation`](Error::PixelDataGroupViolation).
    pub fn try_seek(&mut self, target: Tag) -> Result<bool> {
        loop {
            let header = match self.header {
                Some(header) => header,
                None => match self.read_header()? {
                    Some(header) => header,
                    None => return Ok(false),
                },
            };

            match header.tag.cmp(&target) {
                Ordering::Equal => return Ok(true),
                Ordering::Greater => return Ok(false),
                Ordering::Less => {
                    ensure!(
                        !header.tag.is_in_pixel_data_group() || header.tag == Tag::PIXEL_DATA,
                        PixelDataGroupViolationSnafu { tag: header.tag }
                    );
                    self.skip_value()?;
                }
            }
        }
    }

    /// Skip the value of the open header, closing it.
    ///
    /// _Specific Character Set_ is always read,
    /// so that the character set of later values is known.
    pub fn skip_value(&mut self) -> Result<()> {
        let header = self.header.take().context(NoOpenHeaderSnafu)?;
        if header.tag == Tag::SPECIFIC_CHARACTER_SET {
            self.read_value_of(header)?;
            return Ok(());
        }
        if header.tag.is_group_length() {
            trace!("Skipping group length element {}", header.tag);
        }

        match header.len.get() {
            Some(len) => self
                .parser
                .skip_bytes(len)
                .context(SkipValueSnafu { tag: header.tag }),
            None if header.is_non_primitive() => {
                self.read_items_of(header, |item| item.finish())?;
                Ok(())
            }
            None => {
                self.read_fragments_with(|parser, len| {
                    parser
                        .skip_bytes(len)
                        .context(SkipValueSnafu { tag: header.tag })
                })?;
                Ok(())
            }
        }
    }

    /// Read the value of the open header, closing it.
    ///
    /// Sequences are read into nested data sets,
    /// encapsulated pixel data into its fragments,
    /// and primitive values according to the value reading strategy.
    pub fn read_value(&mut self) -> Result<Value> {
        let header = self.header.take().context(NoOpenHeaderSnafu)?;
        self.read_value_of(header)
    }

    /// Read the next element in full.
    /// An element whose header is already open is read from its value.
    pub fn read_element(&mut self) -> Result<Option<DataElement>> {
        let header = match self.header {
            Some(header) => header,
            None => match self.read_header()? {
                Some(header) => header,
                None => return Ok(None),
            },
        };
        let value = self.read_value()?;
        Ok(Some(DataElement::new(header.tag, header.vr, value)))
    }

    /// Read all remaining elements of the data set.
    pub fn read_dataset(&mut self) -> Result<DataSet> {
        let mut dataset = DataSet::new();
        while let Some(element) = self.read_element()? {
            dataset.put(element);
        }
        Ok(dataset)
    }

    /// Skip all remaining elements of the data set,
    /// including the value of an open header.
    pub fn finish(&mut self) -> Result<()> {
        loop {
            if self.header.is_none() && self.read_header()?.is_none() {
                return Ok(());
            }
            self.skip_value()?;
        }
    }

    /// Visit each item of the open sequence element, closing it.
    ///
    /// `f` is called with a nested reader over each item,
    /// which starts with the current character set of this reader.
    /// Whatever the callback leaves unread in the item is skipped.
    /// Returns the number of items.
    pub fn read_items<F>(&mut self, f: F) -> Result<usize>
    where
        F: FnMut(&mut DataSetReader<'_, D>) -> Result<()>,
    {
        let header = self.header.context(NoOpenHeaderSnafu)?;
        ensure!(
            header.is_non_primitive(),
            NotASequenceSnafu {
                tag: header.tag,
                vr: header.vr,
            }
        );
        self.header = None;
        self.read_items_of(header, f)
    }

    /// Seek to _Pixel Data_ and return its value length,
    /// leaving its header open for a bulk data aware caller.
    ///
    /// Returns `None` if the data set has no pixel data.
    pub fn skip_to_pixel_data(&mut self) -> Result<Option<Length>> {
        if self.try_seek(Tag::PIXEL_DATA)? {
            Ok(self.header.map(|header| header.len))
        } else {
            Ok(None)
        }
    }

    /// Seek to _Pixel Data_ and read it without decoding.
    ///
    /// Native pixel data is returned as its bytes,
    /// encapsulated pixel data as its offset table and fragments.
    pub fn read_pixel_data(&mut self) -> Result<Option<Value>> {
        if self.skip_to_pixel_data()?.is_none() {
            return Ok(None);
        }
        let header = self.header.take().context(NoOpenHeaderSnafu)?;
        if header.len.is_undefined() {
            return self.read_pixel_sequence(header).map(Some);
        }
        let value = self
            .parser
            .read_value_bytes(&header)
            .context(ReadValueSnafu { tag: header.tag })?;
        Ok(Some(Value::Primitive(value)))
    }

    fn read_value_of(&mut self, header: DataElementHeader) -> Result<Value> {
        if header.is_non_primitive() {
            let mut items = Vec::new();
            self.read_items_of(header, |item| {
                items.push(item.read_dataset()?);
                Ok(())
            })?;
            return Ok(Value::Sequence(items));
        }

        if header.len.is_undefined() {
            if header.is_encapsulated_pixeldata() {
                return self.read_pixel_sequence(header);
            }
            let mut chunks = self.read_fragments(header.tag)?;
            return match chunks.len() {
                0 => Ok(PrimitiveValue::Empty.into()),
                1 => Ok(PrimitiveValue::U8(C::from_vec(chunks.remove(0))).into()),
                count => MultiChunkValueSnafu {
                    tag: header.tag,
                    count,
                }
                .fail(),
            };
        }

        if header.tag == Tag::SPECIFIC_CHARACTER_SET {
            return self.read_specific_character_set(header);
        }

        let value = match self.options.value_read {
            ValueReadStrategy::Interpreted => self.parser.read_value(&header, &self.charset),
            ValueReadStrategy::Preserved => {
                self.parser.read_value_preserved(&header, &self.charset)
            }
            ValueReadStrategy::Raw => self.parser.read_value_bytes(&header),
        }
        .context(ReadValueSnafu { tag: header.tag })?;
        Ok(value.into())
    }

    /// Read _Specific Character Set_ and switch to the character set it names.
    fn read_specific_character_set(&mut self, header: DataElementHeader) -> Result<Value> {
        let tag = header.tag;
        let len = header.len.get().context(UndefinedLengthSnafu {
            tag,
            vr: header.vr,
            position: self.parser.position(),
        })?;
        let bytes = self
            .parser
            .read_bytes(len)
            .context(ReadValueSnafu { tag })?;
        let text = String::from_utf8_lossy(&bytes);
        let text = text.trim_end_matches(|c| c == ' ' || c == '\0');
        let terms: C<String> = if text.is_empty() {
            C::new()
        } else {
            text.split('\\').map(str::to_owned).collect()
        };

        self.charset =
            SpecificCharacterSet::from_values(&terms).context(UnsupportedCharacterSetSnafu)?;
        debug!("Specific character set is now {:?}", self.charset);

        let value = match self.options.value_read {
            ValueReadStrategy::Raw if bytes.is_empty() => PrimitiveValue::Empty,
            ValueReadStrategy::Raw => PrimitiveValue::U8(C::from_vec(bytes)),
            _ if terms.is_empty() => PrimitiveValue::Empty,
            _ => PrimitiveValue::Strs(terms),
        };
        Ok(value.into())
    }

    /// Read encapsulated pixel data:
    /// the first item is the basic offset table, the rest are fragments.
    fn read_pixel_sequence(&mut self, header: DataElementHeader) -> Result<Value> {
        let mut chunks = self.read_fragments(header.tag)?.into_iter();
        let offset_table = chunks
            .next()
            .map(|table| {
                table
                    .chunks_exact(4)
                    .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .collect()
            })
            .unwrap_or_default();
        Ok(PixelFragmentSequence::new(offset_table, chunks.collect()).into())
    }

    fn read_fragments(&mut self, tag: Tag) -> Result<Vec<Vec<u8>>> {
        let mut chunks = Vec::new();
        self.read_fragments_with(|parser, len| {
            chunks.push(parser.read_bytes(len).context(ReadValueSnafu { tag })?);
            Ok(())
        })?;
        Ok(chunks)
    }

    /// Walk the items of a value of undefined length
    /// up to the sequence delimiter, handing each item length to `f`.
    fn read_fragments_with<F>(&mut self, mut f: F) -> Result<usize>
    where
        F: FnMut(&mut D, u32) -> Result<()>,
    {
        let mut count = 0;
        loop {
            let position = self.parser.position();
            let item = self
                .parser
                .decode_item_header()
                .context(ReadItemHeaderSnafu { position })?;
            match item {
                SequenceItemHeader::Item { len } => {
                    let len = len.get().context(UndefinedItemLengthSnafu)?;
                    f(&mut *self.parser, len)?;
                    count += 1;
                }
                SequenceItemHeader::SequenceDelimiter => return Ok(count),
                SequenceItemHeader::ItemDelimiter => {
                    return UnexpectedDelimiterSnafu {
                        tag: Tag::ITEM_DELIMITER,
                        position,
                    }
                    .fail()
                }
            }
        }
    }

    fn read_items_of<F>(&mut self, header: DataElementHeader, mut f: F) -> Result<usize>
    where
        F: FnMut(&mut DataSetReader<'_, D>) -> Result<()>,
    {
        let sequence_end = header
            .len
            .get()
            .map(|len| self.parser.position() + u64::from(len));
        trace!("Entering sequence {} ({})", header.tag, header.len);

        let mut count = 0;
        loop {
            let position = self.parser.position();
            if let Some(end) = sequence_end {
                if position == end {
                    break;
                }
                ensure!(
                    position < end,
                    InconsistentSequenceEndSnafu {
                        end_of_sequence: end,
                        bytes_read: position,
                    }
                );
            }

            let item = self
                .parser
                .decode_header()
                .context(ReadItemHeaderSnafu { position })?
                .context(PrematureEndSnafu { position })?;
            match item.tag {
                Tag::ITEM => {}
                Tag::SEQUENCE_DELIMITER if sequence_end.is_none() => break,
                tag if tag.is_delimitation_item() => {
                    return UnexpectedDelimiterSnafu { tag, position }.fail()
                }
                tag => return UnexpectedTagSnafu { tag, position }.fail(),
            }

            let scope = match item.len.get() {
                Some(len) => Scope::Defined {
                    end: self.parser.position() + u64::from(len),
                },
                None => Scope::Undefined,
            };
            trace!("Item #{} of {} ({})", count, header.tag, item.len);

            let mut nested = DataSetReader {
                parser: &mut *self.parser,
                options: self.options,
                charset: self.charset.clone(),
                scope,
                header: None,
                last_tag: None,
                done: false,
            };
            f(&mut nested)?;
            nested.finish()?;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSetReader, Error, ReadOptions, ValueReadStrategy};
    use crate::stateful::decode::StatefulDecoder;
    use dcmio_core::header::{Length, Tag};
    use dcmio_core::{dcm_value, Value, VR};
    use dcmio_encoding::text::SpecificCharacterSet;
    use dcmio_encoding::transfer_syntax::{EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN};

    #[rustfmt::skip]
    static FLAT: &[u8] = &[
        // (0008,0060) Modality CS "MR"
        0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00, b'M', b'R',
        // (0010,0010) PatientName PN "Doe^John"
        0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x08, 0x00,
        b'D', b'o', b'e', b'^', b'J', b'o', b'h', b'n',
        // (0020,0013) InstanceNumber IS "7 "
        0x20, 0x00, 0x13, 0x00, b'I', b'S', 0x02, 0x00, b'7', b' ',
        // (0028,0010) Rows US 256
        0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x00, 0x01,
    ];

    #[test]
    fn seek_forward_and_read() {
        let mut source = FLAT;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());

        assert!(reader.try_seek(Tag(0x0010, 0x0010)).unwrap());
        assert_eq!(reader.header().map(|h| h.vr), Some(VR::PN));
        assert_eq!(
            reader.read_value().unwrap(),
            Value::Primitive(dcm_value!(Strs, ["Doe^John"])),
        );

        // absent tag: stops at the next one, which stays open
        assert!(!reader.try_seek(Tag(0x0020, 0x000D)).unwrap());
        assert_eq!(reader.header().map(|h| h.tag), Some(Tag(0x0020, 0x0013)));
        assert!(reader.try_seek(Tag(0x0020, 0x0013)).unwrap());
        assert_eq!(
            reader.read_value().unwrap(),
            Value::Primitive(dcm_value!(I64, 7)),
        );

        assert!(!reader.try_seek(Tag(0x0030, 0x0000)).unwrap());
        assert_eq!(reader.read_header().unwrap(), None);
    }

    #[test]
    fn header_state_machine() {
        let mut source = FLAT;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());

        assert!(matches!(reader.read_value(), Err(Error::NoOpenHeader { .. })));
        let header = reader.read_header().unwrap().unwrap();
        assert_eq!(header.tag, Tag(0x0008, 0x0060));
        assert_eq!(header.len, Length(2));
        assert!(matches!(
            reader.read_header(),
            Err(Error::HeaderAlreadyOpen { .. })
        ));
        reader.skip_value().unwrap();
        assert_eq!(reader.position(), 10);
        let header = reader.read_header().unwrap().unwrap();
        assert_eq!(header.tag, Tag(0x0010, 0x0010));
    }

    #[test]
    fn preserved_and_raw_strategies() {
        let mut source = FLAT;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let options = ReadOptions::default().value_read(ValueReadStrategy::Preserved);
        let mut reader = DataSetReader::new(&mut decoder, options);
        assert!(reader.try_seek(Tag(0x0020, 0x0013)).unwrap());
        assert_eq!(
            reader.read_value().unwrap(),
            Value::Primitive(dcm_value!(Strs, ["7"])),
        );

        let mut source = FLAT;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let options = ReadOptions::default().value_read(ValueReadStrategy::Raw);
        let mut reader = DataSetReader::new(&mut decoder, options);
        assert!(reader.try_seek(Tag(0x0028, 0x0010)).unwrap());
        assert_eq!(
            reader.read_value().unwrap(),
            Value::Primitive(dcm_value!(U8, [0x00, 0x01])),
        );
    }

    #[test]
    fn specific_character_set_is_applied_when_skipped() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0008,0005) SpecificCharacterSet, implicit, len 10, "ISO_IR 100"
            0x08, 0x00, 0x05, 0x00, 0x0a, 0x00, 0x00, 0x00,
            b'I', b'S', b'O', b'_', b'I', b'R', b' ', b'1', b'0', b'0',
            // (0010,0010) PatientName, len 6, "M\xfcller"
            0x10, 0x00, 0x10, 0x00, 0x06, 0x00, 0x00, 0x00,
            b'M', 0xfc, b'l', b'l', b'e', b'r',
        ];
        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &IMPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());

        assert!(reader.try_seek(Tag(0x0010, 0x0010)).unwrap());
        assert_eq!(
            reader.charset(),
            &SpecificCharacterSet::from_code("ISO_IR 100").unwrap()
        );
        assert_eq!(
            reader.read_value().unwrap(),
            Value::Primitive(dcm_value!(Strs, ["Müller"])),
        );
    }

    #[test]
    fn unsupported_character_set() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0008,0005) SpecificCharacterSet CS "ISO_IR 999"
            0x08, 0x00, 0x05, 0x00, b'C', b'S', 0x0a, 0x00,
            b'I', b'S', b'O', b'_', b'I', b'R', b' ', b'9', b'9', b'9',
        ];
        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        let err = reader.read_element().unwrap_err();
        assert!(matches!(err, Error::UnsupportedCharacterSet { .. }));
    }

    #[test]
    fn encapsulated_pixel_data() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0028,0010) Rows US 2
            0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x02, 0x00,
            // (7FE0,0010) PixelData OB, undefined length
            0xe0, 0x7f, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
            // offset table item, one entry
            0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            // fragment, 4 bytes
            0xfe, 0xff, 0x00, 0xe0, 0x04, 0x00, 0x00, 0x00,
            0xde, 0xad, 0xbe, 0xef,
            // sequence delimiter
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];

        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        let len = reader.skip_to_pixel_data().unwrap().unwrap();
        assert!(len.is_undefined());

        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        let value = reader.read_pixel_data().unwrap().unwrap();
        let pixels = value.pixel_sequence().unwrap();
        assert_eq!(pixels.offset_table, vec![0]);
        assert_eq!(pixels.fragments, vec![vec![0xde, 0xad, 0xbe, 0xef]]);
        assert_eq!(reader.read_header().unwrap(), None);
        assert_eq!(reader.position(), DATA.len() as u64);
    }

    #[test]
    fn multi_chunk_value_is_rejected() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0042,0011) EncapsulatedDocument OB, undefined length
            0x42, 0x00, 0x11, 0x00, b'O', b'B', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
            0xfe, 0xff, 0x00, 0xe0, 0x02, 0x00, 0x00, 0x00, 0x01, 0x02,
            0xfe, 0xff, 0x00, 0xe0, 0x02, 0x00, 0x00, 0x00, 0x03, 0x04,
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        let err = reader.read_element().unwrap_err();
        assert!(matches!(err, Error::MultiChunkValue { count: 2, .. }));

        // skipping walks over all chunks
        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        reader.finish().unwrap();
        assert_eq!(reader.position(), DATA.len() as u64);
    }

    #[test]
    fn stray_delimiter_at_root() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        assert!(matches!(
            reader.read_header(),
            Err(Error::UnexpectedDelimiter { position: 0, .. })
        ));
    }

    #[test]
    fn truncated_tag_is_an_error() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            // (0008,0060) Modality CS "MR"
            0x08, 0x00, 0x60, 0x00, b'C', b'S', 0x02, 0x00, b'M', b'R',
            // three bytes of the next tag
            0x10, 0x00, 0x10,
        ];
        let mut source = DATA;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        assert!(reader.read_element().unwrap().is_some());
        assert!(matches!(reader.read_element(), Err(Error::ReadHeader { .. })));

        let mut source = &DATA[..10];
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        assert_eq!(reader.read_dataset().unwrap().len(), 1);
    }

    #[test]
    fn undefined_length_only_where_allowed() {
        #[rustfmt::skip]
        static IMPLICIT_CS: &[u8] = &[
            // (0008,0060) Modality, undefined length
            0x08, 0x00, 0x60, 0x00, 0xff, 0xff, 0xff, 0xff,
            // item "MR"
            0xfe, 0xff, 0x00, 0xe0, 0x02, 0x00, 0x00, 0x00, b'M', b'R',
            // sequence delimiter
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut source = IMPLICIT_CS;
        let mut decoder = StatefulDecoder::new(&mut source, &IMPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        assert!(matches!(
            reader.read_element(),
            Err(Error::UndefinedLength {
                vr: VR::CS,
                position: 0,
                ..
            })
        ));

        #[rustfmt::skip]
        static EXPLICIT_UT: &[u8] = &[
            // (0040,A160) TextValue UT, undefined length
            0x40, 0x00, 0x60, 0xa1, b'U', b'T', 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut source = EXPLICIT_UT;
        let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        assert!(matches!(
            reader.read_header(),
            Err(Error::UndefinedLength { vr: VR::UT, .. })
        ));

        // implicit VR of an unknown attribute resolves to UN, which may be undefined
        #[rustfmt::skip]
        static IMPLICIT_UN: &[u8] = &[
            // (0009,1010) private, undefined length
            0x09, 0x00, 0x10, 0x10, 0xff, 0xff, 0xff, 0xff,
            // sequence delimiter
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut source = IMPLICIT_UN;
        let mut decoder = StatefulDecoder::new(&mut source, &IMPLICIT_VR_LITTLE_ENDIAN);
        let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
        let element = reader.read_element().unwrap().unwrap();
        assert_eq!(element.vr(), VR::UN);
        assert_eq!(element.value(), &Value::Sequence(Vec::new()));
    }
}
