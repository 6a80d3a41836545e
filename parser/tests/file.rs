//! Whole files: preamble, file meta group and main data set.
use dcmio_core::value::PixelFragmentSequence;
use dcmio_core::{dcm_value, DataElement, DataSet, VR};
use dcmio_dictionary_std::{tags, uids};
use dcmio_parser::meta::{read_file, write_file, Error, FileMetaTableBuilder, PREAMBLE_LENGTH};

fn meta(transfer_syntax: &str) -> dcmio_parser::FileMetaTable {
    FileMetaTableBuilder::new()
        .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
        .media_storage_sop_instance_uid("1.2.3.4.5")
        .transfer_syntax(transfer_syntax)
        .implementation_class_uid("1.2.345")
        .implementation_version_name("DCMIO_010")
        .build()
        .unwrap()
}

fn image() -> DataSet {
    let mut dataset = DataSet::new();
    dataset.put_value(tags::SOP_CLASS_UID, VR::UI, dcm_value!(Strs, [uids::CT_IMAGE_STORAGE]));
    dataset.put_value(tags::SOP_INSTANCE_UID, VR::UI, dcm_value!(Strs, ["1.2.3.4.5"]));
    dataset.put_value(tags::MODALITY, VR::CS, dcm_value!(Strs, ["CT"]));
    dataset.put_value(tags::PATIENT_NAME, VR::PN, dcm_value!(Strs, ["Doe^Jane"]));
    dataset.put_value(tags::ROWS, VR::US, dcm_value!(U16, [1]));
    dataset.put_value(tags::COLUMNS, VR::US, dcm_value!(U16, [2]));
    dataset
}

#[test]
fn write_and_read_native_files() {
    for ts in [
        uids::IMPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_LITTLE_ENDIAN,
        uids::EXPLICIT_VR_BIG_ENDIAN,
    ] {
        let meta = meta(ts);
        let mut dataset = image();
        dataset.put_value(tags::PIXEL_DATA, VR::OW, dcm_value!(U16, [0x0100, 0x0302]));

        let mut out = Vec::new();
        write_file(&mut out, &meta, &dataset).unwrap();
        assert!(out[..PREAMBLE_LENGTH].iter().all(|b| *b == 0));
        assert_eq!(&out[PREAMBLE_LENGTH..PREAMBLE_LENGTH + 4], b"DICM");

        let (read_meta, read_dataset) = read_file(&out[..]).unwrap();
        assert_eq!(read_meta, meta, "{}", ts);
        assert_eq!(read_meta.transfer_syntax().unwrap().uid(), ts);
        assert_eq!(read_dataset, dataset, "{}", ts);
    }
}

#[test]
fn encapsulated_pixel_data_passes_through() {
    let meta = meta(uids::JPEG_BASELINE8_BIT);
    let mut dataset = image();
    dataset.put(DataElement::new(
        tags::PIXEL_DATA,
        VR::OB,
        PixelFragmentSequence::new(vec![0], vec![vec![0xff, 0xd8, 0xff, 0xd9]]),
    ));

    let mut out = Vec::new();
    write_file(&mut out, &meta, &dataset).unwrap();
    let (read_meta, read_dataset) = read_file(&out[..]).unwrap();
    assert!(read_meta.transfer_syntax().unwrap().is_encapsulated());
    assert_eq!(read_dataset, dataset);
}

#[test]
fn unknown_transfer_syntax() {
    let meta = meta("1.2.3.4.5.6.7");
    let err = write_file(Vec::new(), &meta, &image()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedTransferSyntax { .. }));
}

#[test]
fn missing_magic_code() {
    let mut data = vec![0; PREAMBLE_LENGTH];
    data.extend_from_slice(b"DICN");
    let err = read_file(&data[..]).unwrap_err();
    assert!(matches!(err, Error::NotDicom { .. }));
}
