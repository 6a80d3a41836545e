//! Writing data sets and reading them back in each native transfer syntax.
use dcmio_core::{dcm_value, DataElement, DataSet, Tag, VR};
use dcmio_dictionary_std::{tags, uids};
use dcmio_encoding::transfer_syntax::{
    TransferSyntax, EXPLICIT_VR_BIG_ENDIAN, EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN,
};
use dcmio_parser::{
    DataSetReader, DataSetWriter, ReadOptions, SequenceLength, StatefulDecoder, WriteOptions,
};

/// A data set with the dictionary VR of every attribute,
/// so that it survives implicit VR coding unchanged.
fn sample_dataset() -> DataSet {
    let mut item = DataSet::new();
    item.put_value(
        tags::REFERENCED_SOP_CLASS_UID,
        VR::UI,
        dcm_value!(Strs, [uids::CT_IMAGE_STORAGE]),
    );
    item.put_value(
        tags::REFERENCED_SOP_INSTANCE_UID,
        VR::UI,
        dcm_value!(Strs, ["1.2.3"]),
    );

    let mut dataset = DataSet::new();
    dataset.put_value(
        tags::IMAGE_TYPE,
        VR::CS,
        dcm_value!(Strs, ["ORIGINAL", "PRIMARY", "AXIAL"]),
    );
    dataset.put_value(tags::MODALITY, VR::CS, dcm_value!(Strs, ["CT"]));
    dataset.put_value(
        tags::STUDY_DESCRIPTION,
        VR::LO,
        dcm_value!(Strs, ["Head"]),
    );
    dataset.put(DataElement::new(
        tags::REFERENCED_IMAGE_SEQUENCE,
        VR::SQ,
        vec![item.clone(), item],
    ));
    dataset.put_value(tags::PATIENT_NAME, VR::PN, dcm_value!(Strs, ["Doe^John"]));
    dataset.put_value(tags::PATIENT_AGE, VR::AS, dcm_value!(Strs, ["042Y"]));
    dataset.put_value(tags::SLICE_THICKNESS, VR::DS, dcm_value!(F64, [2.5]));
    dataset.put_value(tags::INSTANCE_NUMBER, VR::IS, dcm_value!(I64, [7]));
    dataset.put_value(
        tags::IMAGE_POSITION_PATIENT,
        VR::DS,
        dcm_value!(F64, [-125.0, 0.5, 30.25]),
    );
    dataset.put_value(tags::IMAGE_COMMENTS, VR::LT, dcm_value!(Str, "first scan"));
    dataset.put_value(
        tags::FRAME_INCREMENT_POINTER,
        VR::AT,
        dcm_value!(Tags, [Tag(0x0018, 0x1063)]),
    );
    dataset.put_value(tags::ROWS, VR::US, dcm_value!(U16, [2]));
    dataset.put_value(tags::COLUMNS, VR::US, dcm_value!(U16, [2]));
    dataset.put_value(tags::BITS_ALLOCATED, VR::US, dcm_value!(U16, [16]));
    dataset.put_value(
        tags::PIXEL_DATA,
        VR::OW,
        dcm_value!(U16, [0x0102, 0x0304, 0x0506, 0x0708]),
    );
    dataset
}

fn write(dataset: &DataSet, ts: &TransferSyntax, options: WriteOptions) -> Vec<u8> {
    let mut out = Vec::new();
    let mut writer = DataSetWriter::new(&mut out, ts).with_options(options);
    let expected_len = writer.dataset_length(dataset).unwrap();
    writer.write_dataset(dataset).unwrap();
    assert_eq!(writer.bytes_written(), u64::from(expected_len));
    out
}

fn read(data: &[u8], ts: &TransferSyntax) -> DataSet {
    let mut source = data;
    let mut decoder = StatefulDecoder::new(&mut source, ts);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
    let dataset = reader.read_dataset().unwrap();
    assert_eq!(reader.position(), data.len() as u64);
    dataset
}

fn round_trip(ts: &TransferSyntax) {
    let dataset = sample_dataset();
    let length_options = [
        SequenceLength::Undefined,
        SequenceLength::Defined,
        SequenceLength::DefinedIfPossible,
    ];
    for sequence_length in length_options {
        for item_length in length_options {
            let options = WriteOptions::default()
                .sequence_length(sequence_length)
                .item_length(item_length);
            let bytes = write(&dataset, ts, options);
            assert_eq!(read(&bytes, ts), dataset, "{} with {:?}", ts.name(), options);
        }
    }
}

#[test]
fn round_trip_implicit_vr_little_endian() {
    round_trip(&IMPLICIT_VR_LITTLE_ENDIAN);
}

#[test]
fn round_trip_explicit_vr_little_endian() {
    round_trip(&EXPLICIT_VR_LITTLE_ENDIAN);
}

#[test]
fn round_trip_explicit_vr_big_endian() {
    round_trip(&EXPLICIT_VR_BIG_ENDIAN);
}

#[test]
fn values_are_padded_to_even_length() {
    let bytes = write(
        &sample_dataset(),
        &EXPLICIT_VR_LITTLE_ENDIAN,
        WriteOptions::default(),
    );
    assert_eq!(bytes.len() % 2, 0);

    // UI is padded with a null byte, other text with a space
    assert!(bytes.windows(6).any(|w| w == b"1.2.3\0"));
    assert!(bytes.windows(6).any(|w| w == b"IS\x02\x007 "));

    let mut source = &bytes[..];
    let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
    while let Some(header) = reader.read_header().unwrap() {
        if let Some(len) = header.len.get() {
            assert_eq!(len % 2, 0, "odd length in {}", header.tag);
        }
        reader.skip_value().unwrap();
    }
}

#[test]
fn big_endian_words_are_swapped() {
    let mut dataset = DataSet::new();
    dataset.put_value(tags::ROWS, VR::US, dcm_value!(U16, [0x0102]));
    let bytes = write(&dataset, &EXPLICIT_VR_BIG_ENDIAN, WriteOptions::default());
    #[rustfmt::skip]
    let expected: &[u8] = &[
        0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02, 0x01, 0x02,
    ];
    assert_eq!(&bytes[..], expected);
}
