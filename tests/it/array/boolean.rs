use columnar::array::*;
use columnar::bitmap::Bitmap;

#[test]
fn from_bitmaps() {
    let array = BooleanArray::from_data(
        Bitmap::from_u8_slice([0b00010000], 5),
        Some(Bitmap::from_u8_slice([0b00010001], 5)),
    )
    .unwrap();
    assert_eq!(array.null_count(), 3);
    assert_eq!(
        array.iter().collect::<Vec<_>>(),
        vec![Some(false), None, None, None, Some(true)]
    );
}

#[test]
fn validity_length_mismatch() {
    let result = BooleanArray::from_data(Bitmap::from([true, false]), Some(Bitmap::from([true])));
    assert!(result.is_err());
}

#[test]
fn slice() {
    let array = BooleanArray::from(vec![Some(true), None, Some(false), Some(true)]);
    let sliced = array.slice(1, 3);
    assert_eq!(sliced.iter().collect::<Vec<_>>(), vec![None, Some(false), Some(true)]);
    assert_eq!(format!("{:?}", sliced), "BooleanArray[None, false, true]");
}

#[test]
fn mutable() {
    let mut array = MutableBooleanArray::new();
    array.push(Some(true));
    array.push(None);
    array.extend_from_slice(&[false]);
    let array = array.finish();
    assert_eq!(array, BooleanArray::from(vec![Some(true), None, Some(false)]));
}
