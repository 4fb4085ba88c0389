use std::io::Cursor;
use std::sync::Arc;

use columnar::array::Int32Array;
use columnar::datatypes::{DataType, Field, Schema};
use columnar::error::{Error, Result};
use columnar::io::ipc::{StreamReader, StreamWriter, WriteOptions};
use columnar::record_batch::{RecordBatch, RecordBatchReader};

use super::all_types;

fn batches() -> Vec<RecordBatch> {
    let batch = all_types();
    vec![batch.slice(0, 1), batch.slice(1, 2), batch]
}

fn write_stream(batches: &[RecordBatch], finish: bool) -> Result<Vec<u8>> {
    let mut writer = StreamWriter::new(vec![], WriteOptions::default());
    writer.start(batches[0].schema())?;
    for batch in batches {
        writer.write(batch)?;
    }
    if finish {
        writer.finish()?;
    }
    Ok(writer.into_inner())
}

#[test]
fn round_trip() -> Result<()> {
    let expected = batches();
    let data = write_stream(&expected, true)?;

    let mut reader = StreamReader::try_new(Cursor::new(data))?;
    assert_eq!(reader.schema(), expected[0].schema());
    assert!(!reader.is_finished());

    let batches = reader.by_ref().collect::<Result<Vec<_>>>()?;
    assert_eq!(batches, expected);
    assert!(reader.is_finished());
    assert!(reader.next().is_none());
    Ok(())
}

#[test]
fn schema_only() -> Result<()> {
    let schema = all_types().schema().clone();
    let mut writer = StreamWriter::new(vec![], WriteOptions::default());
    writer.start(&schema)?;
    writer.finish()?;

    let mut reader = StreamReader::try_new(Cursor::new(writer.into_inner()))?;
    assert_eq!(RecordBatchReader::schema(&reader), &schema);
    assert!(reader.next().is_none());
    Ok(())
}

#[test]
fn missing_end_of_stream() -> Result<()> {
    let expected = batches();
    let data = write_stream(&expected, false)?;
    let reader = StreamReader::try_new(Cursor::new(data))?;
    assert_eq!(reader.collect::<Result<Vec<_>>>()?, expected);
    Ok(())
}

#[test]
fn truncated_message() -> Result<()> {
    let data = write_stream(&batches(), true)?;
    // cut in the middle of the last batch
    let data = data[..data.len() - 20].to_vec();
    let mut reader = StreamReader::try_new(Cursor::new(data))?;
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().unwrap().is_ok());
    assert!(matches!(reader.next(), Some(Err(Error::Decode(_)))));
    assert!(reader.is_finished());
    assert!(reader.next().is_none());
    Ok(())
}

#[test]
fn truncated_marker() -> Result<()> {
    let expected = batches();
    let mut data = write_stream(&expected, false)?;
    data.extend_from_slice(&[0xff, 0xff]);

    let mut reader = StreamReader::try_new(Cursor::new(data))?;
    for _ in 0..expected.len() {
        assert!(reader.next().unwrap().is_ok());
    }
    assert!(matches!(reader.next(), Some(Err(Error::Decode(_)))));
    assert!(reader.next().is_none());
    Ok(())
}

#[test]
fn must_start_with_a_schema() {
    let result = StreamReader::try_new(Cursor::new(vec![]));
    assert!(matches!(result, Err(Error::Decode(_))));

    let result = StreamReader::try_new(Cursor::new(vec![0u8; 16]));
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn write_before_start() {
    let mut writer = StreamWriter::new(vec![], WriteOptions::default());
    let result = writer.write(&all_types());
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn started_twice() -> Result<()> {
    let schema = all_types().schema().clone();
    let mut writer = StreamWriter::new(vec![], WriteOptions::default());
    writer.start(&schema)?;
    assert!(matches!(writer.start(&schema), Err(Error::InvalidArgument(_))));
    Ok(())
}

#[test]
fn schema_mismatch() -> Result<()> {
    let mut writer = StreamWriter::new(vec![], WriteOptions::default());
    writer.start(all_types().schema())?;

    let schema = Schema::new(vec![Field::new("a", DataType::Int32, false)]);
    let other = RecordBatch::try_new(Arc::new(schema), vec![Int32Array::from_slice([1]).into()])?;
    assert!(matches!(writer.write(&other), Err(Error::SchemaMismatch(_))));
    Ok(())
}

#[test]
fn write_after_finish() -> Result<()> {
    let batch = all_types();
    let mut writer = StreamWriter::new(vec![], WriteOptions::default());
    writer.start(batch.schema())?;
    writer.finish()?;
    assert!(matches!(writer.write(&batch), Err(Error::Io(_))));
    Ok(())
}

#[test]
fn across_threads() -> Result<()> {
    let (sender, receiver) = crossbeam_channel::unbounded::<Vec<u8>>();

    let producer = std::thread::spawn(move || -> Result<()> {
        let data = write_stream(&batches(), true)?;
        // deliver the stream in small chunks
        for chunk in data.chunks(100) {
            sender.send(chunk.to_vec()).expect("the receiver is alive");
        }
        Ok(())
    });

    let data = receiver.iter().flatten().collect::<Vec<u8>>();
    producer.join().expect("the producer does not panic")?;

    let reader = StreamReader::try_new(Cursor::new(data))?;
    let (sender, receiver) = crossbeam_channel::bounded::<RecordBatch>(1);
    let consumer = std::thread::spawn(move || receiver.iter().map(|b| b.num_rows()).sum::<usize>());
    for batch in reader {
        sender.send(batch?).expect("the consumer is alive");
    }
    drop(sender);
    assert_eq!(consumer.join().expect("the consumer does not panic"), 6);
    Ok(())
}
