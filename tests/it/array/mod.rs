mod binary;
mod boolean;
mod dictionary;
mod fixed_size_list;
mod list;
mod primitive;
mod struct_;
mod union;
mod utf8;

use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::datatypes::{DataType, Field, UnionMode};
use columnar::error::Error;
use columnar::scalar::Scalar;

#[test]
fn try_new_dispatches_on_physical_type() {
    let data = ArrayData::try_new(
        DataType::Date32,
        2,
        None,
        vec![Buffer::from_slice_ref(&[1i32, 2])],
        vec![],
    )
    .unwrap();
    let array = Array::try_new(data).unwrap();
    assert!(matches!(array, Array::Int32(_)));
    assert_eq!(array.data_type(), &DataType::Date32);
    assert!(array.downcast_ref::<Int32Array>().is_ok());
    assert!(matches!(
        array.downcast_ref::<Int64Array>(),
        Err(Error::TypeMismatch(_))
    ));
}

#[test]
fn new_empty() {
    let datatypes = vec![
        DataType::Null,
        DataType::Boolean,
        DataType::Float64,
        DataType::LargeUtf8,
        DataType::Binary,
        ListArray::<i64>::default_datatype(DataType::Int8),
        FixedSizeListArray::default_datatype(DataType::UInt16, 3),
        DataType::Struct(vec![Field::new("a", DataType::Int32, true)]),
        DataType::Dictionary(
            columnar::datatypes::IntegerType::UInt8,
            Box::new(DataType::Utf8),
            false,
        ),
        DataType::Union(
            vec![Field::new("a", DataType::Int32, true)],
            None,
            UnionMode::Dense,
        ),
    ];
    for data_type in datatypes {
        let array = Array::new_empty(&data_type);
        assert_eq!(array.len(), 0);
        assert_eq!(array.null_count(), 0);
        assert_eq!(array.data_type(), &data_type);
    }
}

#[test]
fn slice_is_zero_copy() {
    let array: Array = Int32Array::from(vec![Some(1), None, Some(3), Some(4)]).into();
    let sliced = array.slice(1, 2);
    assert_eq!(sliced.len(), 2);
    assert_eq!(sliced.null_count(), 1);
    assert_eq!(sliced.data().offset(), 1);
    assert!(sliced.data().buffers()[0].ptr_eq(&array.data().buffers()[0]));
    assert_eq!(sliced.scalar(0), Scalar::Null);
    assert_eq!(sliced.scalar(1), Scalar::Int32(3));
}

#[test]
fn equality_is_logical() {
    // the values behind null slots do not matter
    let lhs = Int32Array::try_from_data(
        DataType::Int32,
        Buffer::from_slice_ref(&[1i32, 100]),
        Some(Buffer::from(&[0b01u8])),
    )
    .unwrap();
    let rhs = Int32Array::from(vec![Some(1), None]);
    assert_eq!(lhs, rhs);

    // neither does the offset
    let sliced = Int32Array::from_slice([0, 1, 2]).slice(1, 1);
    assert_eq!(sliced, Int32Array::from_slice([1]));

    let lhs: Array = Int32Array::from_slice([1]).into();
    let rhs: Array = Int64Array::from_slice([1]).into();
    assert_ne!(lhs, rhs);
}

#[test]
fn null() {
    let array = NullArray::new_null(3);
    assert_eq!(array.len(), 3);
    assert_eq!(array.null_count(), 3);
    let array: Array = array.into();
    assert!(array.is_null(0));
    assert!(array.validity().is_none());
    assert_eq!(array.slice(1, 1).null_count(), 1);
    assert_eq!(array.scalar(2), Scalar::Null);
}

#[test]
fn data_round_trip() {
    let array: Array = Utf8Array::<i32>::from(vec![Some("a"), None]).into();
    let data = array.clone().into_data();
    let back = Array::try_from(data).unwrap();
    assert_eq!(array, back);
}
