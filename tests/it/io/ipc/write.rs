use std::sync::Arc;

use columnar::array::{Array, ArrayData};
use columnar::datatypes::{DataType, Field, Schema};
use columnar::error::Error;
use columnar::record_batch::RecordBatch;
use columnar::io::ipc::{encode_batch, WriteOptions};

use super::all_types;

fn metadata_len(message: &[u8]) -> usize {
    i32::from_le_bytes([message[4], message[5], message[6], message[7]]) as usize
}

#[test]
fn framing() {
    let message = encode_batch(&all_types(), &WriteOptions::default()).unwrap();
    assert_eq!(&message[..4], &[0xff; 4]);
    let body_start = 8 + metadata_len(&message);
    assert_eq!(body_start % 8, 0);
    assert_eq!((message.len() - body_start) % 8, 0);
}

#[test]
fn alignment_64() {
    let options = WriteOptions::try_new(64).unwrap();
    assert_eq!(options.alignment(), 64);
    let message = encode_batch(&all_types(), &options).unwrap();
    let body_start = 8 + metadata_len(&message);
    assert_eq!(body_start % 64, 0);
    assert_eq!((message.len() - body_start) % 64, 0);
}

#[test]
fn invalid_alignment() {
    for alignment in [0, 4, 12, 100] {
        assert!(matches!(
            WriteOptions::try_new(alignment),
            Err(Error::InvalidArgument(_))
        ));
    }
}

#[test]
fn deterministic() {
    let batch = all_types();
    let options = WriteOptions::default();
    assert_eq!(
        encode_batch(&batch, &options).unwrap(),
        encode_batch(&batch.clone(), &options).unwrap()
    );
}

#[test]
fn fixed_size_list_too_large() {
    let item = Field::new("item", DataType::Int8, true);
    let data_type = DataType::FixedSizeList(Box::new(item), i32::MAX as usize + 1);
    let data = ArrayData::builder(data_type.clone())
        .add_child_data(Array::new_empty(&DataType::Int8).into_data())
        .build()
        .unwrap();
    let schema = Schema::new(vec![Field::new("a", data_type, true)]);
    let batch = RecordBatch::try_new(Arc::new(schema), vec![Array::try_new(data).unwrap()]).unwrap();

    assert!(matches!(
        encode_batch(&batch, &WriteOptions::default()),
        Err(Error::Overflow)
    ));
}
