//! Attributes whose dictionary VR admits more than one alternative.
use dcmio_core::{dcm_value, Tag, Value, VR};
use dcmio_dictionary_std::tags;
use dcmio_encoding::transfer_syntax::{EXPLICIT_VR_LITTLE_ENDIAN, IMPLICIT_VR_LITTLE_ENDIAN};
use dcmio_parser::{DataSetReader, DataSetWriter, ReadOptions, StatefulDecoder};

fn read_one(data: &[u8], explicit: bool) -> (VR, Value) {
    let mut source = data;
    let ts = if explicit {
        EXPLICIT_VR_LITTLE_ENDIAN
    } else {
        IMPLICIT_VR_LITTLE_ENDIAN
    };
    let mut decoder = StatefulDecoder::new(&mut source, &ts);
    let mut reader = DataSetReader::new(&mut decoder, ReadOptions::default());
    let element = reader.read_element().unwrap().unwrap();
    assert_eq!(reader.read_element().unwrap(), None);
    (element.vr(), element.into_value())
}

#[test]
fn overlay_data_follows_the_wire_vr() {
    #[rustfmt::skip]
    static AS_OB: &[u8] = &[
        // (6000,3000) OverlayData OB, 4 bytes
        0x00, 0x60, 0x00, 0x30, b'O', b'B', 0x00, 0x00, 0x04, 0x00, 0x00, 0x00,
        0x01, 0x02, 0x03, 0x04,
    ];
    #[rustfmt::skip]
    static AS_OW: &[u8] = &[
        // (6000,3000) OverlayData OW, 4 bytes
        0x00, 0x60, 0x00, 0x30, b'O', b'W', 0x00, 0x00, 0x04, 0x00, 0x00, 0x00,
        0x01, 0x02, 0x03, 0x04,
    ];

    let (vr, value) = read_one(AS_OB, true);
    assert_eq!(vr, VR::OB);
    assert_eq!(value, Value::Primitive(dcm_value!(U8, [1, 2, 3, 4])));

    let (vr, value) = read_one(AS_OW, true);
    assert_eq!(vr, VR::OW);
    assert_eq!(value, Value::Primitive(dcm_value!(U16, [0x0201, 0x0403])));
}

#[test]
fn implicit_overlay_data_is_read_as_words() {
    #[rustfmt::skip]
    static DATA: &[u8] = &[
        // (6002,3000) OverlayData in a repeating group, 4 bytes
        0x02, 0x60, 0x00, 0x30, 0x04, 0x00, 0x00, 0x00,
        0x01, 0x02, 0x03, 0x04,
    ];
    let (vr, value) = read_one(DATA, false);
    assert_eq!(vr, VR::OW);
    assert_eq!(value, Value::Primitive(dcm_value!(U16, [0x0201, 0x0403])));
}

#[test]
fn implicit_pixel_data_is_read_as_words() {
    #[rustfmt::skip]
    static DATA: &[u8] = &[
        // (7FE0,0010) PixelData, 4 bytes
        0xe0, 0x7f, 0x10, 0x00, 0x04, 0x00, 0x00, 0x00,
        0xff, 0x00, 0x00, 0xff,
    ];
    let (vr, value) = read_one(DATA, false);
    assert_eq!(vr, VR::OW);
    assert_eq!(value, Value::Primitive(dcm_value!(U16, [0x00ff, 0xff00])));
}

#[test]
fn smallest_pixel_value_defaults_to_unsigned() {
    #[rustfmt::skip]
    static IMPLICIT: &[u8] = &[
        // (0028,0106) SmallestImagePixelValue, 2 bytes, 0xFFFF
        0x28, 0x00, 0x06, 0x01, 0x02, 0x00, 0x00, 0x00, 0xff, 0xff,
    ];
    #[rustfmt::skip]
    static EXPLICIT_SS: &[u8] = &[
        // (0028,0106) SmallestImagePixelValue SS, -1
        0x28, 0x00, 0x06, 0x01, b'S', b'S', 0x02, 0x00, 0xff, 0xff,
    ];

    let (vr, value) = read_one(IMPLICIT, false);
    assert_eq!(vr, VR::US);
    assert_eq!(value, Value::Primitive(dcm_value!(U16, [0xffff])));

    let (vr, value) = read_one(EXPLICIT_SS, true);
    assert_eq!(vr, VR::SS);
    assert_eq!(value, Value::Primitive(dcm_value!(I16, [-1])));
}

#[test]
fn write_ambiguous_attributes_in_default_form() {
    let mut out = Vec::new();
    let mut writer = DataSetWriter::new(&mut out, &EXPLICIT_VR_LITTLE_ENDIAN);
    writer
        .write_attribute(tags::SMALLEST_IMAGE_PIXEL_VALUE, &dcm_value!(U16, [0]))
        .unwrap();
    writer
        .write_attribute(Tag(0x6000, 0x3000), &dcm_value!(U16, [0x0201]))
        .unwrap();

    #[rustfmt::skip]
    let expected: &[u8] = &[
        0x28, 0x00, 0x06, 0x01, b'U', b'S', 0x02, 0x00, 0x00, 0x00,
        0x00, 0x60, 0x00, 0x30, b'O', b'W', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
        0x01, 0x02,
    ];
    assert_eq!(&out[..], expected);
}
