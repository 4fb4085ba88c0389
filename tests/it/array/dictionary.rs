use columnar::array::*;
use columnar::datatypes::{DataType, IntegerType};
use columnar::error::Error;
use columnar::scalar::Scalar;

#[test]
fn from_keys_and_values() {
    let keys = Int8Array::from(vec![Some(1), None, Some(0), Some(1)]);
    let values = Utf8Array::<i32>::from_slice(["a", "b"]);
    let array = DictionaryArray::from_data(keys.into(), values.into()).unwrap();

    assert_eq!(
        array.data_type(),
        &DataType::Dictionary(IntegerType::Int8, Box::new(DataType::Utf8), false)
    );
    assert_eq!(array.null_count(), 1);
    assert_eq!(array.key(0), Some(1));
    assert_eq!(array.key(1), None);
    assert_eq!(array.value(0), Scalar::Utf8("b".to_string()));
    assert_eq!(array.value(1), Scalar::Null);

    let sliced = array.slice(2, 2);
    assert_eq!(sliced.keys().len(), 2);
    assert_eq!(sliced.values().len(), 2);
    assert_eq!(format!("{:?}", sliced), "DictionaryArray[a, b]");
}

#[test]
fn key_out_of_bounds() {
    let keys = UInt32Array::from_slice([0, 2]);
    let values = Utf8Array::<i32>::from_slice(["a", "b"]);
    let result = DictionaryArray::from_data(keys.into(), values.into());
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn null_keys_are_not_checked() {
    // the value behind a null key is out of bounds
    let keys = Int32Array::try_from_data(
        DataType::Int32,
        columnar::buffer::Buffer::from_slice_ref(&[0i32, 100]),
        Some(columnar::buffer::Buffer::from(&[0b01u8])),
    )
    .unwrap();
    let values = Int64Array::from_slice([7]);
    let array = DictionaryArray::from_data(keys.into(), values.into()).unwrap();
    assert_eq!(array.value(0), Scalar::Int64(7));
}

#[test]
fn keys_must_be_integers() {
    let keys = Float32Array::from_slice([0.0]);
    let values = Utf8Array::<i32>::from_slice(["a"]);
    let result = DictionaryArray::from_data(keys.into(), values.into());
    assert!(matches!(result, Err(Error::TypeMismatch(_))));
}

#[test]
fn mutable_deduplicates() {
    let mut array = MutableDictionaryArray::<u16>::new();
    for value in [Some("x"), Some("y"), None, Some("x"), Some("y")] {
        array.try_push(value).unwrap();
    }
    assert_eq!(array.distinct(), 2);
    let array = array.finish();
    assert_eq!(array.key_type(), IntegerType::UInt16);
    assert_eq!(array.values(), &Array::from(Utf8Array::<i32>::from_slice(["x", "y"])));
    assert_eq!(
        array.iter().collect::<Vec<_>>(),
        vec![
            Some(Scalar::Utf8("x".to_string())),
            Some(Scalar::Utf8("y".to_string())),
            None,
            Some(Scalar::Utf8("x".to_string())),
            Some(Scalar::Utf8("y".to_string())),
        ]
    );
}
