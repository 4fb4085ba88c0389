use columnar::bitmap::utils::{bytes_for, count_zeros, get_bit};
use columnar::bitmap::{Bitmap, MutableBitmap};
use columnar::buffer::Buffer;

#[test]
fn from_u8_slice() {
    let bitmap = Bitmap::from_u8_slice([0b00110111], 6);
    assert_eq!(bitmap.len(), 6);
    assert_eq!(bitmap.null_count(), 1);
    assert_eq!(
        bitmap.iter().collect::<Vec<_>>(),
        vec![true, true, true, false, true, true]
    );
}

#[test]
fn slice_recounts() {
    let bitmap = Bitmap::from_u8_slice([0b00010001, 0b00000001], 9);
    assert_eq!(bitmap.unset_bits(), 6);

    let sliced = bitmap.slice(4, 5);
    assert_eq!(sliced.len(), 5);
    assert!(sliced.get_bit(0));
    assert!(sliced.get_bit(4));
    assert_eq!(sliced.unset_bits(), 3);

    let (bytes, offset, length) = sliced.as_slice();
    assert_eq!(bytes, &[0b00010001, 0b00000001]);
    assert_eq!(offset, 4);
    assert_eq!(length, 5);
}

#[test]
fn try_new_checks_length() {
    let bytes = Buffer::from(&[0b1u8]);
    assert!(Bitmap::try_new(bytes.clone(), 8).is_ok());
    assert!(Bitmap::try_new(bytes, 9).is_err());
}

#[test]
fn aligned_buffer() {
    let bitmap = Bitmap::from_u8_slice([0b10110000, 0b00000001], 12).slice(4, 5);
    let buffer = bitmap.to_aligned_buffer();
    assert_eq!(buffer.as_slice(), &[0b00011011]);
}

#[test]
fn equality_ignores_offset() {
    let lhs = Bitmap::from_u8_slice([0b00000110], 3).slice(1, 2);
    let rhs = Bitmap::from([true, true]);
    assert_eq!(lhs, rhs);
}

#[test]
fn mutable() {
    let mut bitmap = MutableBitmap::new();
    bitmap.push(true);
    bitmap.extend_constant(9, false);
    bitmap.push(true);
    assert_eq!(bitmap.len(), 11);
    assert_eq!(bitmap.unset_bits(), 9);
    assert_eq!(bitmap.as_slice(), &[0b00000001, 0b00000100]);

    bitmap.set(1, true);
    assert!(bitmap.get(1));

    let bitmap: Bitmap = bitmap.into();
    assert_eq!(bitmap.null_count(), 8);
}

#[test]
fn mutable_into_validity() {
    let all_set = MutableBitmap::from_iter([true, true]);
    assert_eq!(Option::<Bitmap>::from(all_set), None);

    let with_unset = MutableBitmap::from_iter([true, false]);
    assert_eq!(Option::<Bitmap>::from(with_unset).map(|b| b.null_count()), Some(1));
}

#[test]
fn utils() {
    let bytes = [0b01010101u8, 0b11110000];
    assert_eq!(bytes_for(9), 2);
    assert!(get_bit(&bytes, 0));
    assert!(!get_bit(&bytes, 1));
    assert!(get_bit(&bytes, 15));
    assert_eq!(count_zeros(&bytes, 0, 16), 8);
    assert_eq!(count_zeros(&bytes, 4, 8), 6);
}
