//! Separate test suite for using `dcm_value!` in an isolated context,
//! without direct access to dependency `smallvec`

// empty module makes `smallvec` dependency unreachable,
// as would be typical in dependents of `dcmio_core`
// unless they include it themselves
mod smallvec {}

#[test]
fn use_dcm_value() {
    use dcmio_core::dcm_value;

    // multiple string literals with variant, no trailing comma
    let value = dcm_value!(Strs, ["BASE", "LIGHT", "DARK"]);
    assert_eq!(
        value.to_multi_str().as_ref(),
        &["BASE".to_owned(), "LIGHT".to_owned(), "DARK".to_owned()],
    );
    assert_eq!(value.to_str(), "BASE\\LIGHT\\DARK");

    // single string with variant
    let value = dcm_value!(Str, "PALETTE COLOR");
    assert_eq!(value.string().unwrap(), "PALETTE COLOR");

    // numeric values
    let value = dcm_value!(U16, [1, 2, 5]);
    assert_eq!(value.uint16_slice().unwrap(), &[1, 2, 5]);

    // a single numeric value
    let value = dcm_value!(F64, 2.5);
    assert_eq!(value.float64_slice().unwrap(), &[2.5]);
}

#[test]
fn use_data_set() {
    use dcmio_core::{dcm_value, DataElement, DataSet, Tag, Value, VR};

    let mut item = DataSet::new();
    item.put_value(Tag(0x0008, 0x1155), VR::UI, dcm_value!(Strs, ["1.2.3"]));

    let mut dataset = DataSet::new();
    dataset.put_value(Tag(0x0010, 0x0010), VR::PN, dcm_value!(Strs, ["Doe^John"]));
    dataset.put(DataElement::new(Tag(0x0008, 0x1140), VR::SQ, vec![item]));
    dataset.put_value(Tag(0x0008, 0x0060), VR::CS, dcm_value!(Strs, ["CT"]));

    // elements are kept in tag order
    let tags: Vec<_> = dataset.tags().collect();
    assert_eq!(
        tags,
        vec![Tag(0x0008, 0x0060), Tag(0x0008, 0x1140), Tag(0x0010, 0x0010)]
    );

    let sequence = dataset.get(Tag(0x0008, 0x1140)).unwrap();
    assert_eq!(sequence.value().multiplicity(), 1);
    assert!(matches!(sequence.value(), Value::Sequence(_)));
    assert_eq!(sequence.to_str(), None);
}
