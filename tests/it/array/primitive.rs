use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::datatypes::{DataType, TimeUnit};
use columnar::error::Error;

#[test]
fn basics() {
    let array = Int32Array::from(vec![Some(1), None, Some(10)]);
    assert_eq!(array.len(), 3);
    assert_eq!(array.null_count(), 1);
    assert!(array.is_null(1));
    assert_eq!(array.value(2), 10);
    assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some(1), None, Some(10)]);
    assert_eq!(format!("{:?}", array), "Int32[1, None, 10]");
}

#[test]
fn from_buffers() {
    let array = Float64Array::try_from_data(
        DataType::Float64,
        Buffer::from_slice_ref(&[1.0f64, 2.0, 3.0]),
        Some(Buffer::from(&[0b101u8])),
    )
    .unwrap();
    assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some(1.0), None, Some(3.0)]);
}

#[test]
fn from_buffers_wrong_type() {
    let result = Int32Array::try_from_data(
        DataType::Int64,
        Buffer::from_slice_ref(&[1i32, 2]),
        None,
    );
    assert!(matches!(result, Err(Error::TypeMismatch(_))));
}

#[test]
fn from_buffers_short_validity() {
    let result = Int32Array::try_from_data(
        DataType::Int32,
        Buffer::from_slice_ref(&[0i32; 9]),
        Some(Buffer::from(&[0u8])),
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn logical_types() {
    let array = Int64Array::from_slice([1_000_000])
        .to(DataType::Timestamp(TimeUnit::Microsecond, Some("+00:00".to_string())));
    assert_eq!(
        array.data_type(),
        &DataType::Timestamp(TimeUnit::Microsecond, Some("+00:00".to_string()))
    );
    assert_eq!(array.values(), &[1_000_000]);
}

#[test]
#[should_panic]
fn to_wrong_physical_type() {
    let _ = Int32Array::from_slice([1]).to(DataType::Int64);
}

#[test]
fn slice() {
    let array = UInt8Array::from(vec![Some(1), None, Some(3), None, Some(5)]);
    let sliced = array.slice(2, 3);
    assert_eq!(sliced.values(), &[3, 0, 5]);
    assert_eq!(sliced.null_count(), 1);
    assert_eq!(sliced.iter().collect::<Vec<_>>(), vec![Some(3), None, Some(5)]);
}

#[test]
fn new_null() {
    let array = Int16Array::new_null(DataType::Int16, 4);
    assert_eq!(array.null_count(), 4);
    assert!(array.iter().all(|x| x.is_none()));
}

#[test]
fn mutable() {
    let mut array = MutablePrimitiveArray::<u32>::new();
    array.push(Some(1));
    array.push_null();
    array.extend_from_slice(&[3, 4]);
    assert_eq!(array.len(), 4);
    let array = array.finish();
    assert_eq!(
        array.iter().collect::<Vec<_>>(),
        vec![Some(1), None, Some(3), Some(4)]
    );
}
