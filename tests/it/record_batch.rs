use std::collections::BTreeMap;
use std::sync::Arc;

use columnar::array::*;
use columnar::datatypes::{DataType, Field, Schema};
use columnar::error::Error;
use columnar::record_batch::{RecordBatch, RecordBatchOptions};

fn fruits() -> RecordBatch {
    let mut metadata = BTreeMap::new();
    metadata.insert("source".to_string(), "orchard".to_string());
    let schema = Schema::new(vec![
        Field::new("id", DataType::UInt32, false),
        Field::new("fruit", DataType::Utf8, true),
    ])
    .with_metadata(metadata);

    let ids = UInt32Array::from_slice([1, 2, 3, 4]);
    let fruits = Utf8Array::<i32>::from(vec![Some("apple"), None, Some("pineapple"), Some("kiwi")]);
    RecordBatch::try_new(Arc::new(schema), vec![ids.into(), fruits.into()]).unwrap()
}

#[test]
fn basics() {
    let batch = fruits();
    assert_eq!(batch.num_rows(), 4);
    assert_eq!(batch.num_columns(), 2);
    assert_eq!(batch.schema().metadata().get("source").map(|x| x.as_str()), Some("orchard"));

    let fruit = batch.column_by_name("fruit").unwrap();
    let fruit = fruit.downcast_ref::<Utf8Array<i32>>().unwrap();
    assert_eq!(fruit.value(2), "pineapple");
    assert_eq!(fruit.null_count(), 1);
}

#[test]
fn column_errors() {
    let batch = fruits();
    assert!(matches!(
        batch.column(2),
        Err(Error::IndexOutOfRange { index: 2, len: 2 })
    ));
    assert!(matches!(
        batch.column_by_name("vegetable"),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn slice() {
    let batch = fruits().slice(2, 2);
    assert_eq!(batch.num_rows(), 2);
    let fruit = batch.column(1).unwrap();
    assert_eq!(fruit, &Array::from(Utf8Array::<i32>::from_slice(["pineapple", "kiwi"])));
    assert_eq!(fruit.data().offset(), 2);
}

#[test]
#[should_panic]
fn slice_overflowing_rows() {
    fruits().slice(1, usize::MAX);
}

#[test]
fn mismatches() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("a", DataType::Int32, false),
        Field::new("b", DataType::Int32, false),
    ]));

    let result = RecordBatch::try_new(schema.clone(), vec![Int32Array::from_slice([1]).into()]);
    assert!(matches!(result, Err(Error::SchemaMismatch(_))));

    let result = RecordBatch::try_new(
        schema.clone(),
        vec![
            Int32Array::from_slice([1]).into(),
            Int32Array::from_slice([1, 2]).into(),
        ],
    );
    assert!(matches!(result, Err(Error::SchemaMismatch(_))));

    let result = RecordBatch::try_new(
        schema,
        vec![
            Int32Array::from_slice([1]).into(),
            Int64Array::from_slice([1]).into(),
        ],
    );
    assert!(matches!(result, Err(Error::SchemaMismatch(_))));
}

#[test]
fn nested_field_names() {
    let mut values = MutableListArray::<i32, _>::new(MutablePrimitiveArray::<i8>::new());
    values.try_push(Some([Some(1i8)])).unwrap();
    let values: Array = values.finish().into();

    // the item is named "item", the schema names it "element"
    let field = Field::new(
        "values",
        DataType::List(Box::new(Field::new("element", DataType::Int8, true))),
        true,
    );
    let schema = Arc::new(Schema::new(vec![field]));

    assert!(RecordBatch::try_new(schema.clone(), vec![values.clone()]).is_ok());

    let options = RecordBatchOptions {
        match_field_names: true,
        ..Default::default()
    };
    let result = RecordBatch::try_new_with_options(schema, vec![values], &options);
    assert!(matches!(result, Err(Error::SchemaMismatch(_))));
}

#[test]
fn struct_conversions() {
    let batch = fruits();
    let array = StructArray::from(batch.clone());
    assert_eq!(array.len(), 4);
    assert_eq!(array.fields()[1].name(), "fruit");

    let back = RecordBatch::try_from(array).unwrap();
    assert_eq!(back.columns(), batch.columns());
    // the schema-level metadata is not carried by a struct
    assert!(back.schema().metadata().is_empty());
}

#[test]
fn empty() {
    let schema = fruits().schema().clone();
    let batch = RecordBatch::new_empty(schema);
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.column(1).unwrap().data_type(), &DataType::Utf8);
}
