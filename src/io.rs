//! Low-level little-endian encoding and bounds-checked slice access for NanoBuf records.
//!
//! This module provides the encoding layer underneath [`crate::NanoBufWriter`]. Every scalar
//! the format knows about is converted through the [`crate::io::NanoIO`] trait, and every
//! absolute-offset access goes through a bounds-checked helper so that header patches can never
//! run past the end of the buffer.
//!
//! # Key Components
//!
//! ## Core Trait
//! - [`crate::io::NanoIO`] - Fixed-width little-endian conversion for the primitive types
//!
//! ## Writing Functions
//! - [`crate::io::write_le`] - Write a value at the buffer start
//! - [`crate::io::write_le_at`] - Write a value at a specific offset with auto-advance
//!
//! ## Reading Functions
//! - [`crate::io::read_le`] - Read a value from the buffer start
//! - [`crate::io::read_le_at`] - Read a value at a specific offset with auto-advance
//!
//! The reading side is not a decoder for NanoBuf records; it is the reference little-endian
//! reader used to inspect what the writer produced.
//!
//! ## Supported Types
//! - **Unsigned integers**: `u8`, `u16`, `u32`, `u64`
//! - **Signed integers**: `i8`, `i16`, `i32`, `i64`
//! - **Floating point**: `f32`, `f64`
//!
//! # Usage Examples
//!
//! ```rust
//! use nanobuf::io::{read_le_at, write_le_at};
//!
//! let mut data = [0u8; 8];
//! let mut offset = 0;
//!
//! write_le_at(&mut data, &mut offset, 10_i32)?;  // offset: 0 -> 4
//! write_le_at(&mut data, &mut offset, -1_i32)?;  // offset: 4 -> 8
//! assert_eq!(data, [10, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
//!
//! let mut offset = 4;
//! let size: i32 = read_le_at(&data, &mut offset)?;
//! assert_eq!(size, -1);
//! # Ok::<(), nanobuf::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Result<T>`] and report [`crate::Error::OutOfBounds`] when the
//! buffer is too short, including when `offset + width` overflows `usize`. Nothing is written
//! in that case.

use crate::{Error::OutOfBounds, Result};

/// Fixed-width little-endian conversion for the primitive types of the NanoBuf format.
///
/// Each implementation names the byte array that holds its encoding through the `Bytes`
/// associated type (e.g. `[u8; 4]` for `i32`), so the encoded width is known at compile time.
pub trait NanoIO: Sized + Copy {
    /// Byte array holding the encoded value.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Decode `Self` from little-endian bytes
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Encode `Self` as little-endian bytes
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_nano_io {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NanoIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_nano_io!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Checks that `len` bytes starting at `offset` lie within a buffer of `size` bytes.
///
/// Returns the exclusive end of the range.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the range exceeds the buffer or `offset + len`
/// overflows.
pub fn check_range(offset: usize, len: usize, size: usize) -> Result<usize> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(end),
        _ => Err(OutOfBounds { offset, len, size }),
    }
}

/// Safely reads a value of type `T` in little-endian byte order from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `T::WIDTH`.
pub fn read_le<T: NanoIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at `offset`.
///
/// The offset is advanced by the width of `T` after a successful read.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (will be advanced after reading)
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust
/// use nanobuf::io::read_le_at;
///
/// let data = [0x01, 0x00, 0x00, 0x00, 0xD2, 0x04, 0x00, 0x00];
/// let mut offset = 0;
///
/// let type_id: u32 = read_le_at(&data, &mut offset)?;
/// let value: i32 = read_le_at(&data, &mut offset)?;
/// assert_eq!((type_id, value, offset), (1, 1234, 8));
/// # Ok::<(), nanobuf::Error>(())
/// ```
pub fn read_le_at<T: NanoIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let end = check_range(*offset, T::WIDTH, data.len())?;

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds {
            offset: *offset,
            len: T::WIDTH,
            size: data.len(),
        });
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Safely writes a value of type `T` in little-endian byte order to the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `T::WIDTH`.
pub fn write_le<T: NanoIO>(data: &mut [u8], value: T) -> Result<()> {
    let mut offset = 0_usize;
    write_le_at(data, &mut offset, value)
}

/// Safely writes a value of type `T` in little-endian byte order at `offset`.
///
/// The offset is advanced by the width of `T` after a successful write. On failure neither the
/// buffer nor the offset is touched.
///
/// # Arguments
///
/// * `data` - The mutable byte buffer to write to
/// * `offset` - Mutable reference to the offset position (will be advanced after writing)
/// * `value` - The value to write
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust
/// use nanobuf::io::write_le_at;
///
/// let mut data = [0u8; 4];
/// let mut offset = 0;
///
/// write_le_at(&mut data, &mut offset, 1_u16)?;
/// write_le_at(&mut data, &mut offset, 2_u16)?;
/// assert_eq!(data, [0x01, 0x00, 0x02, 0x00]);
/// assert!(write_le_at(&mut data, &mut offset, 3_u8).is_err());
/// # Ok::<(), nanobuf::Error>(())
/// ```
pub fn write_le_at<T: NanoIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let end = check_range(*offset, T::WIDTH, data.len())?;

    data[*offset..end].copy_from_slice(value.to_le_bytes().as_ref());
    *offset = end;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn widths() {
        assert_eq!(<u8 as NanoIO>::WIDTH, 1);
        assert_eq!(<i16 as NanoIO>::WIDTH, 2);
        assert_eq!(<f32 as NanoIO>::WIDTH, 4);
        assert_eq!(<i64 as NanoIO>::WIDTH, 8);
        assert_eq!(<f64 as NanoIO>::WIDTH, 8);
    }

    #[test]
    fn read_le_u8() {
        let result = read_le::<u8>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x01);
    }

    #[test]
    fn read_le_u16() {
        let result = read_le::<u16>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0201);
    }

    #[test]
    fn read_le_u32() {
        let result = read_le::<u32>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0403_0201);
    }

    #[test]
    fn read_le_i64() {
        let result = read_le::<i64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0807060504030201);
    }

    #[test]
    fn read_le_f64() {
        let result = read_le::<f64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 5.447603722011605e-270);
    }

    #[test]
    fn read_le_at_advances() {
        let mut offset = 2;
        let value: u16 = read_le_at(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(value, 0x0403);
        assert_eq!(offset, 4);
    }

    #[test]
    fn read_le_short_buffer() {
        let result = read_le::<u32>(&TEST_BUFFER[..3]);
        assert_eq!(
            result.unwrap_err(),
            Error::OutOfBounds {
                offset: 0,
                len: 4,
                size: 3
            }
        );
    }

    #[test]
    fn write_le_i32_negative() {
        let mut data = [0u8; 4];
        write_le(&mut data, -128_i32).unwrap();
        assert_eq!(data, [0x80, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn write_le_f64() {
        let mut data = [0u8; 8];
        write_le(&mut data, 9.8_f64).unwrap();
        assert_eq!(data, [0x9A, 0x99, 0x99, 0x99, 0x99, 0x99, 0x23, 0x40]);
    }

    #[test]
    fn write_le_at_sequence() {
        let mut data = [0u8; 7];
        let mut offset = 0;
        write_le_at(&mut data, &mut offset, 0xAB_u8).unwrap();
        write_le_at(&mut data, &mut offset, 0x0102_u16).unwrap();
        write_le_at(&mut data, &mut offset, 0x0304_0506_u32).unwrap();
        assert_eq!(offset, 7);
        assert_eq!(data, [0xAB, 0x02, 0x01, 0x06, 0x05, 0x04, 0x03]);
    }

    #[test]
    fn write_le_at_out_of_bounds_leaves_buffer() {
        let mut data = [0xCC_u8; 6];
        let mut offset = 4;
        let result = write_le_at(&mut data, &mut offset, 0_u32);
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));
        assert_eq!(offset, 4);
        assert_eq!(data, [0xCC; 6]);
    }

    #[test]
    fn check_range_overflow() {
        assert!(check_range(usize::MAX, 1, usize::MAX).is_err());
        assert_eq!(check_range(2, 2, 4).unwrap(), 4);
        assert_eq!(check_range(4, 0, 4).unwrap(), 4);
        assert!(check_range(5, 0, 4).is_err());
    }

    #[test]
    fn roundtrip_u64_max() {
        let mut data = [0u8; 8];
        write_le(&mut data, u64::MAX).unwrap();
        assert_eq!(read_le::<u64>(&data).unwrap(), u64::MAX);
        assert_eq!(read_le::<i64>(&data).unwrap(), -1);
    }
}
