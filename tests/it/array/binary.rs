use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::error::Error;

#[test]
fn basics() {
    let array = BinaryArray::<i32>::from(vec![Some(b"\x00\x01".as_ref()), None, Some(b"")]);
    assert_eq!(array.null_count(), 1);
    assert_eq!(array.value(0), &[0, 1]);
    assert_eq!(array.value(2), b"");
    assert_eq!(format!("{:?}", array), "BinaryArray[[0, 1], None, []]");
}

#[test]
fn offsets_out_of_bounds() {
    let result = BinaryArray::<i64>::from_data(
        Buffer::from_slice_ref(&[0i64, 4]),
        Buffer::from(b"abc"),
        None,
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn mutable() {
    let mut array = MutableBinaryArray::<i64>::new();
    array.push(Some(b"a"));
    array.push::<&[u8]>(None);
    let array = array.finish();
    assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some(b"a".as_ref()), None]);
    assert_eq!(array.slice(1, 1).null_count(), 1);
}
