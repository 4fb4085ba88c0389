use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::datatypes::{DataType, Field, Schema};
use columnar::error::Error;
use columnar::io::ipc::{decode_batch, encode_batch, WriteOptions};
use columnar::record_batch::RecordBatch;

use super::{all_types, is_within};

fn round_trip(batch: &RecordBatch, options: &WriteOptions) -> RecordBatch {
    let message = Buffer::from(encode_batch(batch, options).unwrap());
    decode_batch(&message).unwrap()
}

#[test]
fn all_types_round_trip() {
    let batch = all_types();
    let decoded = round_trip(&batch, &WriteOptions::default());
    assert_eq!(decoded.schema(), batch.schema());
    for (lhs, rhs) in decoded.columns().iter().zip(batch.columns()) {
        assert_eq!(lhs, rhs, "{:?}", rhs.data_type());
    }
    assert_eq!(decoded, batch);
}

#[test]
fn all_types_round_trip_64() {
    let batch = all_types();
    let decoded = round_trip(&batch, &WriteOptions::try_new(64).unwrap());
    assert_eq!(decoded, batch);
}

#[test]
fn fruits_on_another_thread() {
    let schema = Schema::new(vec![
        Field::new("index", DataType::Int32, false),
        Field::new("fruits", DataType::Utf8, true),
    ]);
    let index = Int32Array::from_slice([0, 1, 2, 3, 4]);
    let fruits = Utf8Array::<i32>::from(vec![
        Some("apple"),
        Some("banana"),
        Some("pineapple"),
        None,
        Some("kiwi"),
    ]);
    let batch =
        RecordBatch::try_new(Arc::new(schema), vec![index.into(), fruits.into()]).unwrap();
    let message = encode_batch(&batch, &WriteOptions::default()).unwrap();

    let decoded = std::thread::spawn(move || decode_batch(&Buffer::from(message)).unwrap())
        .join()
        .unwrap();
    assert_eq!(decoded, batch);
    let fruits = decoded.column_by_name("fruits").unwrap();
    assert!(fruits.is_valid(2));
    let fruits = fruits.downcast_ref::<Utf8Array<i32>>().unwrap();
    assert_eq!(fruits.value(2), "pineapple");
    assert_eq!(fruits.null_count(), 1);
}

#[test]
fn sliced_round_trip() {
    let batch = all_types().slice(1, 2);
    let decoded = round_trip(&batch, &WriteOptions::default());
    assert_eq!(decoded.num_rows(), 2);
    assert_eq!(decoded, batch);
    assert_eq!(decoded.column(4).unwrap().data().offset(), 1);
}

#[test]
fn empty_batch() {
    let batch = RecordBatch::new_empty(all_types().schema().clone());
    let decoded = round_trip(&batch, &WriteOptions::default());
    assert_eq!(decoded.num_rows(), 0);
    assert_eq!(decoded, batch);
}

#[test]
fn re_encoding_is_identical() {
    let options = WriteOptions::default();
    let message = encode_batch(&all_types(), &options).unwrap();
    let decoded = decode_batch(&Buffer::from(&message)).unwrap();
    assert_eq!(encode_batch(&decoded, &options).unwrap(), message);
}

#[test]
fn decoding_twice_is_equal() {
    let message = Buffer::from(encode_batch(&all_types(), &WriteOptions::default()).unwrap());
    let first = decode_batch(&message).unwrap();
    let second = decode_batch(&message).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.schema(), second.schema());
}

#[test]
fn zero_copy() {
    let message = Buffer::from(encode_batch(&all_types(), &WriteOptions::default()).unwrap());
    let decoded = decode_batch(&message).unwrap();

    let ints = decoded.column(4).unwrap();
    assert!(is_within(ints.data().buffers()[0].as_ptr(), &message));
    assert!(is_within(ints.data().validity().unwrap().as_ptr(), &message));

    let strings = decoded.column(20).unwrap();
    assert!(is_within(strings.data().buffers()[1].as_ptr(), &message));

    let list = decoded.column(22).unwrap();
    assert!(is_within(
        list.data().child_data()[0].buffers()[0].as_ptr(),
        &message
    ));

    // the columns keep the message alive
    drop(message);
    assert_eq!(decoded, all_types());
}

#[test]
fn unaligned_body_is_copied() {
    let message = encode_batch(&all_types(), &WriteOptions::default()).unwrap();
    let mut shifted = vec![0u8];
    shifted.extend_from_slice(&message);
    let shifted = Buffer::from(shifted).slice(1, message.len());
    assert_eq!(shifted.as_ptr() as usize % 8, 1);

    let decoded = decode_batch(&shifted).unwrap();
    assert_eq!(decoded, all_types());
    let ints = decoded.column(4).unwrap();
    assert!(!is_within(ints.data().buffers()[0].as_ptr(), &shifted));
}

#[test]
fn truncated() {
    let message = Buffer::from(encode_batch(&all_types(), &WriteOptions::default()).unwrap());
    for len in 0..message.len() {
        let result = decode_batch(&message.slice(0, len));
        assert!(matches!(result, Err(Error::Decode(_))), "{}", len);
    }
}

#[test]
fn trailing_bytes() {
    let mut message = encode_batch(&all_types(), &WriteOptions::default()).unwrap();
    message.extend_from_slice(&[0; 8]);
    let result = decode_batch(&Buffer::from(message));
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn corrupted_metadata() {
    let mut message = encode_batch(&all_types(), &WriteOptions::default()).unwrap();
    message[0] = 0;
    let result = decode_batch(&Buffer::from(&message));
    assert!(matches!(result, Err(Error::Decode(_))));

    message[0] = 0xff;
    // a metadata length pointing past the message
    message[4..8].copy_from_slice(&i32::MAX.to_le_bytes());
    let result = decode_batch(&Buffer::from(&message));
    assert!(matches!(result, Err(Error::Decode(_))));

    // garbage in place of the flatbuffer
    let mut message = encode_batch(&all_types(), &WriteOptions::default()).unwrap();
    message[8..16].copy_from_slice(&[0xaa; 8]);
    let result = decode_batch(&Buffer::from(&message));
    assert!(matches!(result, Err(Error::Decode(_))));
}

fn random_batch(rng: &mut StdRng, rows: usize) -> RecordBatch {
    let ints = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.2) {
                None
            } else {
                Some(rng.gen::<i64>())
            }
        })
        .collect::<Int64Array>();
    let strings = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.1) {
                None
            } else {
                let len = rng.gen_range(0, 12);
                Some(
                    (0..len)
                        .map(|_| rng.gen_range(b'a', b'z' + 1) as char)
                        .collect::<String>(),
                )
            }
        })
        .collect::<Utf8Array<i32>>();

    let mut lists = MutableListArray::<i32, _>::new(MutablePrimitiveArray::<f32>::new());
    for _ in 0..rows {
        if rng.gen_bool(0.1) {
            lists.push_null();
        } else {
            let len = rng.gen_range(0, 5);
            let items = (0..len).map(|_| Some(rng.gen::<f32>())).collect::<Vec<_>>();
            lists.try_push(Some(items)).unwrap();
        }
    }
    let lists = lists.finish();

    let schema = Schema::new(vec![
        Field::new("ints", DataType::Int64, true),
        Field::new("strings", DataType::Utf8, true),
        Field::new("lists", lists.data_type().clone(), true),
    ]);
    RecordBatch::try_new(
        Arc::new(schema),
        vec![ints.into(), strings.into(), lists.into()],
    )
    .unwrap()
}

#[test]
fn random_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let rows = rng.gen_range(0, 200);
        let batch = random_batch(&mut rng, rows);
        let offset = if rows == 0 { 0 } else { rng.gen_range(0, rows) };
        let batch = batch.slice(offset, rows - offset);
        assert_eq!(round_trip(&batch, &WriteOptions::default()), batch);
    }
}
