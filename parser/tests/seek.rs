//! Forward seeking and the guard on the pixel data group.
use dcmio_core::{dcm_value, Tag, Value};
use dcmio_dictionary_std::tags;
use dcmio_encoding::transfer_syntax::{EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN};
use dcmio_parser::dataset::read::Error;
use dcmio_parser::{DataSetReader, ReadOptions, StatefulDecoder};

#[rustfmt::skip]
static IMAGE: &[u8] = &[
    // (0028,0010) Rows US 2
    0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x02, 0x00,
    // (0028,0011) Columns US 2
    0x28, 0x00, 0x11, 0x00, b'U', b'S', 0x02, 0x00, 0x02, 0x00,
    // (7FE0,0010) PixelData OW, 8 bytes
    0xe0, 0x7f, 0x10, 0x00, b'O', b'W', 0x00, 0x00, 0x08, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0x00,
    // (FFFC,FFFC) DataSetTrailingPadding OB, 2 bytes
    0xfc, 0xff, 0xfc, 0xff, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

#[test]
fn seek_is_monotonic() {
    let mut source = IMAGE;
    let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());

    assert!(reader.try_seek(tags::COLUMNS).unwrap());
    reader.skip_value().unwrap();

    // Rows is behind the cursor now
    assert!(!reader.try_seek(tags::ROWS).unwrap());
    assert_eq!(reader.header().map(|h| h.tag), Some(tags::PIXEL_DATA));

    // the header left open by the failed seek is still there
    assert!(reader.try_seek(tags::PIXEL_DATA).unwrap());
}

#[test]
fn seek_past_pixel_data() {
    let mut source = IMAGE;
    let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());

    assert!(reader.try_seek(tags::DATA_SET_TRAILING_PADDING).unwrap());
    assert_eq!(reader.position(), IMAGE.len() as u64 - 2);
}

#[test]
fn read_native_pixel_data() {
    let mut source = IMAGE;
    let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());

    let len = reader.skip_to_pixel_data().unwrap().unwrap();
    assert_eq!(len.get(), Some(8));
    let value = reader.read_value().unwrap();
    assert_eq!(value, Value::Primitive(dcm_value!(U16, [1, 2, 3, 4])));

    // pass-through keeps the bytes as they are
    let mut source = IMAGE;
    let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
    let value = reader.read_pixel_data().unwrap().unwrap();
    assert_eq!(
        value,
        Value::Primitive(dcm_value!(U8, [1, 0, 2, 0, 3, 0, 4, 0]))
    );
}

#[test]
fn no_pixel_data() {
    #[rustfmt::skip]
    static DATA: &[u8] = &[
        // (0028,0010) Rows, implicit, 2
        0x28, 0x00, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x00,
    ];
    let mut source = DATA;
    let mut decoder = StatefulDecoder::new(&mut source, &IMPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
    assert_eq!(reader.skip_to_pixel_data().unwrap(), None);
    assert_eq!(reader.read_pixel_data().unwrap(), None);
}

#[test]
fn pixel_group_elements_cannot_be_skipped() {
    #[rustfmt::skip]
    static DATA: &[u8] = &[
        // (0028,0010) Rows US 2
        0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0x02, 0x00,
        // (7FE0,0001) ExtendedOffsetTable OV, 8 bytes
        0xe0, 0x7f, 0x01, 0x00, b'O', b'V', 0x00, 0x00, 0x08, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // (7FE0,0010) PixelData OB, 2 bytes
        0xe0, 0x7f, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
        0xff, 0xff,
    ];
    let mut source = DATA;
    let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
    let err = reader.skip_to_pixel_data().unwrap_err();
    assert!(matches!(
        err,
        Error::PixelDataGroupViolation {
            tag: Tag(0x7FE0, 0x0001),
            ..
        }
    ));

    // the element itself can still be sought and read
    let mut source = DATA;
    let mut decoder = StatefulDecoder::new(&mut source, &EXPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
    assert!(reader.try_seek(tags::EXTENDED_OFFSET_TABLE).unwrap());
    assert_eq!(
        reader.read_value().unwrap(),
        Value::Primitive(dcm_value!(U64, [0]))
    );
    assert!(reader.try_seek(tags::PIXEL_DATA).unwrap());
}

#[test]
fn seek_in_implicit_data_set() {
    #[rustfmt::skip]
    static DATA: &[u8] = &[
        // (0008,0060) Modality, len 2, "CT"
        0x08, 0x00, 0x60, 0x00, 0x02, 0x00, 0x00, 0x00, b'C', b'T',
        // (0018,0050) SliceThickness, len 4, "2.5 "
        0x18, 0x00, 0x50, 0x00, 0x04, 0x00, 0x00, 0x00, b'2', b'.', b'5', b' ',
        // (0028,0010) Rows, len 2, 512
        0x28, 0x00, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x02,
    ];
    let mut source = DATA;
    let mut decoder = StatefulDecoder::new(&mut source, &IMPLICIT_VR_LITTLE_ENDIAN);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());

    assert!(reader.try_seek(tags::SLICE_THICKNESS).unwrap());
    assert_eq!(
        reader.read_value().unwrap(),
        Value::Primitive(dcm_value!(F64, [2.5]))
    );
    assert!(reader.try_seek(tags::ROWS).unwrap());
    assert_eq!(
        reader.read_value().unwrap(),
        Value::Primitive(dcm_value!(U16, [512]))
    );
    assert!(!reader.try_seek(tags::PIXEL_DATA).unwrap());
}
