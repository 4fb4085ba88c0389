use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::datatypes::{DataType, Field, UnionMode};
use columnar::error::Error;
use columnar::scalar::Scalar;

fn fields() -> Vec<Field> {
    vec![
        Field::new("a", DataType::Int32, true),
        Field::new("b", DataType::Utf8, true),
    ]
}

#[test]
fn dense() {
    let array = UnionArray::from_data(
        DataType::Union(fields(), None, UnionMode::Dense),
        Buffer::from_slice_ref(&[0i8, 1, 0]),
        Some(Buffer::from_slice_ref(&[0i32, 0, 1])),
        vec![
            Int32Array::from_slice([1, 2]).into(),
            Utf8Array::<i32>::from_slice(["x"]).into(),
        ],
    )
    .unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array.null_count(), 0);
    assert!(!array.is_sparse());
    assert_eq!(array.index(2), (0, 1));
    assert_eq!(
        array.value(1),
        Scalar::Union(1, Box::new(Scalar::Utf8("x".to_string())))
    );
    assert_eq!(format!("{:?}", array), "UnionArray[1, x, 2]");

    let sliced = array.slice(1, 2);
    assert_eq!(sliced.types(), &[1, 0]);
    assert_eq!(sliced.offsets(), Some(&[0, 1][..]));
}

#[test]
fn sparse_with_type_ids() {
    let fields = vec![
        Field::new("a", DataType::Int32, true),
        Field::new("b", DataType::Int32, true),
    ];
    let array = UnionArray::from_data(
        DataType::Union(fields, Some(vec![5, 7]), UnionMode::Sparse),
        Buffer::from_slice_ref(&[5i8, 7]),
        None,
        vec![
            Int32Array::from_slice([1, 2]).into(),
            Int32Array::from_slice([3, 4]).into(),
        ],
    )
    .unwrap();
    assert!(array.is_sparse());
    assert_eq!(array.offsets(), None);
    assert_eq!(array.type_id(1), 7);
    assert_eq!(array.value(1), Scalar::Union(7, Box::new(Scalar::Int32(4))));
    assert_eq!(
        array.slice(1, 1).value(0),
        Scalar::Union(7, Box::new(Scalar::Int32(4)))
    );
}

#[test]
fn offsets_must_match_mode() {
    let sparse = UnionArray::from_data(
        DataType::Union(fields(), None, UnionMode::Sparse),
        Buffer::from_slice_ref(&[0i8]),
        Some(Buffer::from_slice_ref(&[0i32])),
        vec![
            Int32Array::from_slice([1]).into(),
            Utf8Array::<i32>::from_slice(["x"]).into(),
        ],
    );
    assert!(matches!(sparse, Err(Error::Layout(_))));

    let dense = UnionArray::from_data(
        DataType::Union(fields(), None, UnionMode::Dense),
        Buffer::from_slice_ref(&[0i8]),
        None,
        vec![
            Int32Array::from_slice([1]).into(),
            Utf8Array::<i32>::from_slice(["x"]).into(),
        ],
    );
    assert!(matches!(dense, Err(Error::Layout(_))));
}

#[test]
fn undeclared_type_id() {
    let result = UnionArray::from_data(
        DataType::Union(fields(), None, UnionMode::Sparse),
        Buffer::from_slice_ref(&[2i8]),
        None,
        vec![
            Int32Array::from_slice([1]).into(),
            Utf8Array::<i32>::from_slice(["x"]).into(),
        ],
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}
