use columnar::datatypes::*;
use columnar::error::Error;

fn schema() -> Schema {
    let mut metadata = Metadata::new();
    metadata.insert("k".to_string(), "v".to_string());
    Schema::new(vec![
        Field::new("a", DataType::Int32, false),
        Field::new(
            "b",
            DataType::Struct(vec![
                Field::new("c", DataType::Utf8, true),
                Field::new(
                    "d",
                    DataType::Union(
                        vec![Field::new("e", DataType::Float64, true)],
                        Some(vec![3]),
                        UnionMode::Dense,
                    ),
                    true,
                ),
            ]),
            true,
        ),
        Field::new(
            "f",
            DataType::Dictionary(IntegerType::UInt16, Box::new(DataType::LargeUtf8), true),
            true,
        ),
        Field::new("a", DataType::Timestamp(TimeUnit::Nanosecond, None), true),
    ])
    .with_metadata(metadata)
}

#[test]
fn lookup() {
    let schema = schema();
    assert_eq!(schema.fields().len(), 4);
    assert_eq!(schema.field(1).name(), "b");
    // the first field with the name
    assert_eq!(schema.index_of("a").unwrap(), 0);
    assert_eq!(schema.field_with_name("f").unwrap().data_type().to_physical_type(),
        PhysicalType::Dictionary(IntegerType::UInt16));
    assert!(matches!(schema.index_of("z"), Err(Error::InvalidArgument(_))));
}

#[test]
fn physical_types() {
    assert_eq!(
        DataType::Date64.to_physical_type(),
        PhysicalType::Primitive(PrimitiveType::Int64)
    );
    assert_eq!(
        DataType::Time32(TimeUnit::Second).to_physical_type(),
        PhysicalType::Primitive(PrimitiveType::Int32)
    );
    assert_eq!(DataType::LargeUtf8.to_physical_type(), PhysicalType::LargeUtf8);
    assert!(DataType::List(Box::new(Field::new("item", DataType::Null, true))).is_nested());
    assert!(!DataType::Binary.is_nested());
}

#[test]
fn equals_ignoring_names() {
    let lhs = DataType::List(Box::new(Field::new("item", DataType::Int8, true)));
    let rhs = DataType::List(Box::new(Field::new("element", DataType::Int8, true)));
    assert_ne!(lhs, rhs);
    assert!(lhs.equals_datatype(&rhs));

    let non_nullable = DataType::List(Box::new(Field::new("item", DataType::Int8, false)));
    assert!(!lhs.equals_datatype(&non_nullable));
}

#[cfg(feature = "serde_types")]
#[test]
fn serde_json_round_trip() {
    let schema = schema();
    let json = serde_json::to_string(&schema).unwrap();
    let back: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(back, schema);
}
