use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::datatypes::DataType;
use columnar::error::Error;

/// `[[[1, 2], [3, 4]], [[5, 6, 7], None, [8]], [[9, 10]]]`
fn nested() -> ListArray<i32> {
    let values: Array = Int32Array::from_slice([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).into();
    let inner = ListArray::<i32>::from_data(
        ListArray::<i32>::default_datatype(DataType::Int32),
        Buffer::from_slice_ref(&[0i32, 2, 4, 7, 7, 8, 10]),
        values,
        Some(Buffer::from(&[0b00110111u8])),
    )
    .unwrap();
    let inner: Array = inner.into();

    ListArray::<i32>::from_data(
        ListArray::<i32>::default_datatype(inner.data_type().clone()),
        Buffer::from_slice_ref(&[0i32, 2, 5, 6]),
        inner,
        None,
    )
    .unwrap()
}

#[test]
fn nested_debug() {
    let array = nested();
    assert_eq!(
        format!("{:?}", array),
        "ListArray[[[1, 2], [3, 4]], [[5, 6, 7], None, [8]], [[9, 10]]]"
    );
}

#[test]
fn nested_access() {
    let array = nested();
    assert_eq!(array.len(), 3);
    assert_eq!(array.null_count(), 0);

    let second = array.value(1);
    let second = second.downcast_ref::<ListArray<i32>>().unwrap();
    assert_eq!(second.len(), 3);
    assert!(second.is_null(1));
    assert_eq!(second.value(1).len(), 0);

    let third = second.value(2);
    assert_eq!(third.downcast_ref::<Int32Array>().unwrap().values(), &[8]);
}

#[test]
fn nested_slice() {
    let array = nested().slice(1, 2);
    assert_eq!(array.offsets(), &[2, 5, 6]);
    assert_eq!(
        format!("{:?}", array),
        "ListArray[[[5, 6, 7], None, [8]], [[9, 10]]]"
    );
}

#[test]
fn item_type_mismatch() {
    let values: Array = Int64Array::from_slice([1]).into();
    let result = ListArray::<i32>::from_data(
        ListArray::<i32>::default_datatype(DataType::Int32),
        Buffer::from_slice_ref(&[0i32, 1]),
        values,
        None,
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn large() {
    let mut array = MutableListArray::<i64, _>::new(MutablePrimitiveArray::<u8>::new());
    array.try_push(Some([Some(1u8), None])).unwrap();
    array.try_push(None::<Vec<Option<u8>>>).unwrap();
    let array = array.finish();

    assert_eq!(array.data_type(), &ListArray::<i64>::default_datatype(DataType::UInt8));
    assert_eq!(array.offsets(), &[0i64, 2, 2]);
    assert_eq!(format!("{:?}", array), "LargeListArray[[1, None], None]");
    let slots = array.iter().collect::<Vec<_>>();
    assert_eq!(slots.len(), 2);
    assert!(slots[1].is_none());
}
