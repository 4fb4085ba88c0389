use columnar::array::*;
use columnar::buffer::Buffer;
use columnar::error::Error;

#[test]
fn basics() {
    let array = Utf8Array::<i32>::from(vec![Some("hello"), None, Some(""), Some("wörld")]);
    assert_eq!(array.len(), 4);
    assert_eq!(array.offsets(), &[0, 5, 5, 5, 11]);
    assert_eq!(array.value(3), "wörld");
    assert_eq!(
        array.iter().collect::<Vec<_>>(),
        vec![Some("hello"), None, Some(""), Some("wörld")]
    );
}

#[test]
fn from_buffers() {
    let array = Utf8Array::<i64>::from_data(
        Buffer::from_slice_ref(&[0i64, 3, 3, 6]),
        Buffer::from(b"abcdef"),
        Some(Buffer::from(&[0b101u8])),
    )
    .unwrap();
    assert_eq!(array.iter().collect::<Vec<_>>(), vec![Some("abc"), None, Some("def")]);
    assert_eq!(format!("{:?}", array), "LargeUtf8Array[abc, None, def]");
}

#[test]
fn invalid_utf8() {
    let result = Utf8Array::<i32>::from_data(
        Buffer::from_slice_ref(&[0i32, 2]),
        Buffer::from(&[0xc3u8, 0x28]),
        None,
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn decreasing_offsets() {
    let result = Utf8Array::<i32>::from_data(
        Buffer::from_slice_ref(&[0i32, 2, 1]),
        Buffer::from(b"ab"),
        None,
    );
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn slice() {
    let array = Utf8Array::<i32>::from_slice(["a", "bb", "ccc"]);
    let sliced = array.slice(1, 2);
    assert_eq!(sliced.offsets(), &[1, 3, 6]);
    assert_eq!(sliced.value(0), "bb");
    assert_eq!(sliced.values_iter().collect::<Vec<_>>(), vec!["bb", "ccc"]);
}

#[test]
fn mutable() {
    let mut array = MutableUtf8Array::<i32>::new();
    array.push(Some("a"));
    array.push::<&str>(None);
    array.try_push(Some("c")).unwrap();
    let array = array.finish();
    assert_eq!(array, Utf8Array::<i32>::from(vec![Some("a"), None, Some("c")]));
}
