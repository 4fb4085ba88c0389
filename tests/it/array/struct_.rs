use columnar::array::*;
use columnar::bitmap::Bitmap;
use columnar::buffer::Buffer;
use columnar::datatypes::{DataType, Field};
use columnar::error::Error;
use columnar::scalar::Scalar;

fn fields() -> Vec<Field> {
    vec![
        Field::new("a", DataType::Boolean, true),
        Field::new("b", DataType::Int32, true),
        Field::new("c", DataType::Int32, false),
    ]
}

fn array() -> StructArray {
    let a = BooleanArray::from_data(
        Bitmap::from_u8_slice([0b00010000], 5),
        Some(Bitmap::from_u8_slice([0b00010001], 5)),
    )
    .unwrap();
    let b = Int32Array::try_from_data(
        DataType::Int32,
        Buffer::from_slice_ref(&[0i32, 28, 42, 0, 0]),
        Some(Buffer::from(&[0b00000110u8])),
    )
    .unwrap();
    let c = Int32Array::from_slice([1, 2, 3, 4, 5]);
    StructArray::from_data(fields(), vec![a.into(), b.into(), c.into()], None).unwrap()
}

#[test]
fn debug() {
    assert_eq!(
        format!("{:?}", array()),
        "StructArray[{a: false, b: None, c: 1}, {a: None, b: 28, c: 2}, {a: None, b: 42, c: 3}, {a: None, b: None, c: 4}, {a: true, b: None, c: 5}]"
    );
}

#[test]
fn values() {
    let array = array();
    assert_eq!(array.len(), 5);
    assert_eq!(array.null_count(), 0);
    assert_eq!(
        array.value(1),
        vec![Scalar::Null, Scalar::Int32(28), Scalar::Int32(2)]
    );
    assert_eq!(
        array.value(4),
        vec![Scalar::Boolean(true), Scalar::Null, Scalar::Int32(5)]
    );
}

#[test]
fn slice() {
    let sliced = array().slice(1, 2);
    assert_eq!(sliced.value(0)[1], Scalar::Int32(28));
    let values = sliced.sliced_values();
    assert_eq!(values[2], Int32Array::from_slice([2, 3]).into());

    let (fields, values, validity) = sliced.into_parts();
    assert_eq!(fields.len(), 3);
    assert_eq!(values[1].len(), 2);
    assert!(validity.is_none());
}

#[test]
fn children_of_different_lengths() {
    let result = StructArray::from_data(
        vec![
            Field::new("a", DataType::Int32, true),
            Field::new("b", DataType::Int32, true),
        ],
        vec![
            Int32Array::from_slice([1, 2]).into(),
            Int32Array::from_slice([1]).into(),
        ],
        None,
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn child_of_wrong_type() {
    let result = StructArray::try_from(vec![(
        Field::new("a", DataType::Int64, true),
        Int32Array::from_slice([1]).into(),
    )]);
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn mutable() {
    let fields = vec![
        Field::new("id", DataType::Int32, false),
        Field::new("name", DataType::Utf8, true),
    ];
    let mut array = MutableStructArray::new(
        fields,
        vec![
            Box::new(MutablePrimitiveArray::<i32>::new()) as Box<dyn MutableArray>,
            Box::new(MutableUtf8Array::<i32>::new()),
        ],
    );
    array
        .value::<MutablePrimitiveArray<i32>>(0)
        .unwrap()
        .push(Some(1));
    array
        .value::<MutableUtf8Array<i32>>(1)
        .unwrap()
        .push(Some("one"));
    array.push(true);
    array.push_null();

    array
        .value::<MutablePrimitiveArray<i32>>(0)
        .unwrap()
        .push(Some(3));
    assert!(matches!(array.finish(), Err(Error::Layout(_))));
    array.value::<MutableUtf8Array<i32>>(1).unwrap().push::<&str>(None);
    array.push(true);

    let array = array.finish().unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array.null_count(), 1);
    assert_eq!(
        format!("{:?}", array),
        "StructArray[{id: 1, name: one}, None, {id: 3, name: None}]"
    );
}
