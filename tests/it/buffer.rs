use columnar::buffer::{Buffer, MutableBuffer};
use columnar::error::Error;
use columnar::types::ToByteSlice;

#[test]
fn new() {
    let buffer = Buffer::new();
    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
}

#[test]
fn from_slice_ref() {
    let buffer = Buffer::from_slice_ref(&[0i32, 1, 2]);
    assert_eq!(buffer.len(), 12);
    assert_eq!(buffer.typed_data::<i32>(), &[0, 1, 2]);
    assert_eq!(buffer.as_ptr() as usize % 64, 0);
}

#[test]
fn slice_shares_memory() {
    let buffer = Buffer::from_slice_ref(&[0i32, 1, 2, 3]);
    let sliced = buffer.slice(4, 8);
    assert_eq!(sliced.len(), 8);
    assert_eq!(sliced.typed_data::<i32>(), &[1, 2]);
    assert!(sliced.ptr_eq(&buffer));
    assert_eq!(sliced.as_ptr(), unsafe { buffer.as_ptr().add(4) });
}

#[test]
fn slice_up_to_the_end() {
    let buffer = Buffer::from_slice_ref(&[0i32, 1, 2, 3]);
    let last = buffer.slice(12, 4);
    assert_eq!(last.typed_data::<i32>(), &[3]);
    assert_eq!(last.as_slice(), &buffer.as_slice()[12..]);

    let empty = buffer.slice(16, 0);
    assert!(empty.is_empty());
    assert_eq!(empty.as_slice(), &[] as &[u8]);

    let all = buffer.slice(0, 16);
    assert_eq!(all, buffer);
    // slicing a slice is relative to it
    assert_eq!(last.slice(0, 4).typed_data::<i32>(), &[3]);
}

#[test]
#[should_panic]
fn slice_out_of_bounds() {
    Buffer::from_slice_ref(&[0i32, 1]).slice(4, 8);
}

#[test]
fn from_iter() {
    let buffer = (0..3i64).collect::<Buffer>();
    assert_eq!(buffer.typed_data::<i64>(), &[0, 1, 2]);
}

#[test]
fn to_byte_slice() {
    let values = [1i32, 2];
    let buffer = Buffer::from(values.to_byte_slice());
    assert_eq!(buffer, Buffer::from_slice_ref(&values));
}

#[test]
fn mutable_capacity_is_rounded() {
    let mut buffer = MutableBuffer::with_capacity(10);
    assert_eq!(buffer.capacity(), 64);
    buffer.push(1u8);
    buffer.extend_from_slice(&[2u16, 3]);
    buffer.extend_zeros(3);
    assert_eq!(buffer.as_slice(), &[1, 2, 0, 3, 0, 0, 0, 0]);

    let buffer: Buffer = buffer.into();
    assert_eq!(buffer.len(), 8);
}

#[test]
fn mutable_resize() {
    let mut buffer = MutableBuffer::from_len_zeroed(3);
    buffer.resize(5, 7);
    assert_eq!(buffer.as_slice(), &[0, 0, 0, 7, 7]);
    buffer.resize(1, 0);
    assert_eq!(buffer.as_slice(), &[0]);
}

#[test]
fn allocation_failure() {
    let result = MutableBuffer::try_with_capacity(usize::MAX - 10);
    assert!(matches!(result, Err(Error::Allocation(_))));
}
