mod read;
mod stream;
mod write;

use std::collections::BTreeMap;
use std::sync::Arc;

use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::datatypes::{DataType, Field, Schema, TimeUnit, UnionMode};
use columnar::record_batch::RecordBatch;

fn list_array() -> ListArray<i32> {
    let mut array = MutableListArray::<i32, _>::new(MutablePrimitiveArray::<i32>::new());
    array.try_push(Some([Some(1), None])).unwrap();
    array.push_null();
    array.try_push(Some(Vec::<Option<i32>>::new())).unwrap();
    array.finish()
}

fn large_list_array() -> ListArray<i64> {
    let mut array = MutableListArray::<i64, _>::new(MutableUtf8Array::<i32>::new());
    array.mut_values().push(Some("a"));
    array.mut_values().push::<&str>(None);
    array.try_push_valid().unwrap();
    array.push_null();
    array.mut_values().push(Some("c"));
    array.try_push_valid().unwrap();
    array.finish()
}

fn dense_union() -> UnionArray {
    let fields = vec![
        Field::new("int", DataType::Int32, true),
        Field::new("str", DataType::Utf8, true),
    ];
    UnionArray::from_data(
        DataType::Union(fields, None, UnionMode::Dense),
        Buffer::from_slice_ref(&[0i8, 1, 0]),
        Some(Buffer::from_slice_ref(&[0i32, 0, 1])),
        vec![
            Int32Array::from(vec![Some(1), None]).into(),
            Utf8Array::<i32>::from_slice(["x"]).into(),
        ],
    )
    .unwrap()
}

fn sparse_union() -> UnionArray {
    let fields = vec![
        Field::new("int", DataType::Int32, true),
        Field::new("str", DataType::Utf8, true),
    ];
    UnionArray::from_data(
        DataType::Union(fields, Some(vec![5, 7]), UnionMode::Sparse),
        Buffer::from_slice_ref(&[5i8, 7, 5]),
        None,
        vec![
            Int32Array::from_slice([1, 2, 3]).into(),
            Utf8Array::<i32>::from_slice(["a", "b", "c"]).into(),
        ],
    )
    .unwrap()
}

/// A batch of 3 rows with one column of every supported type.
pub(crate) fn all_types() -> RecordBatch {
    let columns: Vec<Array> = vec![
        NullArray::new_null(3).into(),
        BooleanArray::from(vec![Some(true), None, Some(false)]).into(),
        Int8Array::from(vec![Some(-1), None, Some(1)]).into(),
        Int16Array::from_slice([1, 2, 3]).into(),
        Int32Array::from(vec![None, Some(2), Some(3)]).into(),
        Int64Array::from_slice([i64::MIN, 0, i64::MAX]).into(),
        UInt8Array::from_slice([0, 1, 255]).into(),
        UInt16Array::from(vec![Some(1), Some(2), None]).into(),
        UInt32Array::from_slice([1, 2, 3]).into(),
        UInt64Array::from_slice([u64::MAX, 0, 1]).into(),
        Float32Array::from(vec![Some(1.5), None, Some(-0.5)]).into(),
        Float64Array::from_slice([0.1, 0.2, 0.3]).into(),
        Int32Array::from_slice([0, 1, 2]).to(DataType::Date32).into(),
        Int64Array::from_slice([0, 86_400_000, 2])
            .to(DataType::Date64)
            .into(),
        Int32Array::from_slice([0, 1, 2])
            .to(DataType::Time32(TimeUnit::Millisecond))
            .into(),
        Int64Array::from_slice([0, 1, 2])
            .to(DataType::Time64(TimeUnit::Nanosecond))
            .into(),
        Int64Array::from(vec![Some(0), None, Some(2)])
            .to(DataType::Timestamp(
                TimeUnit::Microsecond,
                Some("+01:00".to_string()),
            ))
            .into(),
        Int64Array::from_slice([1, 2, 3])
            .to(DataType::Duration(TimeUnit::Second))
            .into(),
        BinaryArray::<i32>::from(vec![Some(b"a".as_ref()), None, Some(b"")]).into(),
        BinaryArray::<i64>::from_slice([b"x".as_ref(), b"yy", b"zzz"]).into(),
        Utf8Array::<i32>::from(vec![Some("a"), Some("bb"), None]).into(),
        Utf8Array::<i64>::from_slice(["x", "", "z"]).into(),
        list_array().into(),
        large_list_array().into(),
        FixedSizeListArray::from_data(
            FixedSizeListArray::default_datatype(DataType::Int16, 2),
            Int16Array::from(vec![Some(1), None, Some(3), Some(4), Some(5), Some(6)]).into(),
            Some(Buffer::from(&[0b011u8])),
        )
        .unwrap()
        .into(),
        StructArray::from_data(
            vec![
                Field::new("a", DataType::Int32, false),
                Field::new("b", DataType::Utf8, true),
            ],
            vec![
                Int32Array::from_slice([1, 2, 3]).into(),
                Utf8Array::<i32>::from(vec![Some("a"), None, Some("c")]).into(),
            ],
            Some(Buffer::from(&[0b101u8])),
        )
        .unwrap()
        .into(),
        DictionaryArray::from_data(
            Int8Array::from(vec![Some(1), None, Some(0)]).into(),
            Utf8Array::<i32>::from_slice(["a", "b"]).into(),
        )
        .unwrap()
        .into(),
        dense_union().into(),
        sparse_union().into(),
    ];

    let mut field_metadata = BTreeMap::new();
    field_metadata.insert("unit".to_string(), "seconds".to_string());
    let fields = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let field = Field::new(format!("c{}", i), column.data_type().clone(), true);
            if i == 17 {
                field.with_metadata(field_metadata.clone())
            } else {
                field
            }
        })
        .collect();

    let mut metadata = BTreeMap::new();
    metadata.insert("origin".to_string(), "tests".to_string());
    let schema = Schema::new(fields).with_metadata(metadata);
    RecordBatch::try_new(Arc::new(schema), columns).unwrap()
}

/// Whether `ptr` points within `region`.
pub(crate) fn is_within(ptr: *const u8, region: &[u8]) -> bool {
    let start = region.as_ptr() as usize;
    let ptr = ptr as usize;
    ptr >= start && ptr < start + region.len()
}
