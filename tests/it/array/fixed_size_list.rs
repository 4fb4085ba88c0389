use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::datatypes::DataType;
use columnar::error::Error;

#[test]
fn basics() {
    let values: Array = Int32Array::from_slice([1, 2, 3, 4, 5, 6]).into();
    let array = FixedSizeListArray::from_data(
        FixedSizeListArray::default_datatype(DataType::Int32, 2),
        values,
        Some(Buffer::from(&[0b101u8])),
    )
    .unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array.size(), 2);
    assert_eq!(format!("{:?}", array), "FixedSizeListArray[[1, 2], None, [5, 6]]");

    let sliced = array.slice(2, 1);
    let last = sliced.value(0);
    assert_eq!(last.downcast_ref::<Int32Array>().unwrap().values(), &[5, 6]);
}

#[test]
fn zero_size() {
    let values: Array = Int32Array::from_slice([1]).into();
    let result = FixedSizeListArray::from_data(
        FixedSizeListArray::default_datatype(DataType::Int32, 0),
        values,
        None,
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn mutable() {
    let mut array = MutableFixedSizeListArray::new(MutablePrimitiveArray::<i16>::new(), 2);
    array.mut_values().extend_from_slice(&[1, 2]);
    array.try_push_valid().unwrap();
    array.push_null();
    array.mut_values().push(Some(3));
    assert!(matches!(array.try_push_valid(), Err(Error::InvalidArgument(_))));
    array.mut_values().push(None);
    array.try_push_valid().unwrap();

    let array = array.finish();
    assert_eq!(array.len(), 3);
    assert_eq!(array.null_count(), 1);
    assert_eq!(array.values().len(), 6);
    assert_eq!(format!("{:?}", array), "FixedSizeListArray[[1, 2], None, [3, None]]");
}
