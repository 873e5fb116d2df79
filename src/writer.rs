//! The NanoBuf record writer.
//!
//! This module provides [`crate::writer::NanoBufWriter`], which owns a growable byte buffer and
//! produces records in the NanoBuf layout:
//!
//! ```text
//! [optional 4-byte length prefix]
//! [4-byte type id]
//! [4-byte field-size entry]*      (entry i at field_table_base + i*4)
//! [payload bytes, in append order]
//! ```
//!
//! All integers are little-endian.
//!
//! # Write Modes
//!
//! ## Absolute-offset writes
//! [`NanoBufWriter::write_length_prefix`], [`NanoBufWriter::write_type_id`],
//! [`NanoBufWriter::write_type_id_at`], [`NanoBufWriter::write_field_size`] and
//! [`NanoBufWriter::write_field_size_at`] patch header cells in place. They never grow the
//! buffer and fail with [`crate::Error::OutOfBounds`] if the cell does not fit.
//!
//! ## Tail appends
//! The `append_*` family writes at the end of the buffer, growing it by exactly the number of
//! bytes written, and returns that number. Since every allocated byte is part of the record, a
//! writer created with `initial_size` bytes appends its payload after those bytes.
//!
//! # Examples
//!
//! ```rust
//! use nanobuf::NanoBufWriter;
//!
//! let mut writer = NanoBufWriter::with_length_prefix(12);
//! writer.write_type_id(10)?;
//! writer.write_field_size(0, 4)?;
//! writer.append_i32(123);
//! writer.write_length_prefix(12)?;
//!
//! assert_eq!(
//!     writer.bytes(),
//!     &[12, 0, 0, 0, 10, 0, 0, 0, 4, 0, 0, 0, 123, 0, 0, 0]
//! );
//! # Ok::<(), nanobuf::Error>(())
//! ```

use tracing::{debug, trace, warn};

use crate::{
    config::WriterConfig,
    io::{write_le_at, NanoIO},
    Error, Result,
};

/// Field size marking a field whose length is given by what follows in the payload
pub const VARIABLE_FIELD_SIZE: i32 = -1;

pub(crate) const LENGTH_PREFIX_SIZE: usize = 4;
pub(crate) const TYPE_ID_SIZE: usize = 4;
pub(crate) const FIELD_SIZE_ENTRY: usize = 4;

/// Growable buffer writer for a single NanoBuf record
///
/// The writer exclusively owns its storage. Callers get read-only views through
/// [`NanoBufWriter::bytes`] or take the buffer with [`NanoBufWriter::into_bytes`].
///
/// There is no internal synchronisation; use one writer per thread or task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NanoBufWriter {
    /// Record bytes; every byte is live
    data: Vec<u8>,

    /// Whether offset 0 is reserved for the length prefix
    length_prefix: bool,
}

impl NanoBufWriter {
    /// Create a writer with `initial_size` zeroed bytes and no length prefix
    ///
    /// ## Arguments
    /// * 'initial_size' - Number of zeroed bytes to allocate, usually the header size
    #[must_use]
    pub fn new(initial_size: usize) -> Self {
        Self::with_config(WriterConfig::new(initial_size))
    }

    /// Create a writer with `initial_size` zeroed bytes whose header starts with a length prefix
    ///
    /// ## Arguments
    /// * 'initial_size' - Number of zeroed bytes to allocate, including the 4-byte prefix slot
    #[must_use]
    pub fn with_length_prefix(initial_size: usize) -> Self {
        Self::with_config(WriterConfig::new(initial_size).length_prefix(true))
    }

    /// Create a writer from a [`WriterConfig`]
    #[must_use]
    pub fn with_config(config: WriterConfig) -> Self {
        debug!(
            initial_size = config.initial_size,
            length_prefix = config.length_prefix,
            "creating NanoBuf writer"
        );

        NanoBufWriter {
            data: vec![0; config.initial_size],
            length_prefix: config.length_prefix,
        }
    }

    /// Returns `true` if the writer was created with a length prefix slot
    pub fn length_prefix_enabled(&self) -> bool {
        self.length_prefix
    }

    /// Offset of the type-id slot: `4` with a length prefix, `0` without
    pub fn header_base(&self) -> usize {
        if self.length_prefix {
            LENGTH_PREFIX_SIZE
        } else {
            0
        }
    }

    /// Offset of the first field-size entry, directly after the type id
    pub fn field_table_base(&self) -> usize {
        self.header_base() + TYPE_ID_SIZE
    }

    /// Current total size of the record in bytes
    pub fn current_size(&self) -> usize {
        self.data.len()
    }

    /// Alias for [`NanoBufWriter::current_size`]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the full buffer in its current state
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the writer and return the record bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Write the total record length at offset 0
    ///
    /// The value is written as-is; which bytes it counts is up to the caller and the paired
    /// decoder.
    ///
    /// # Errors
    /// Returns [`Error::LengthPrefixDisabled`] if the writer was created without a length
    /// prefix, or [`Error::OutOfBounds`] if the buffer is shorter than 4 bytes.
    pub fn write_length_prefix(&mut self, length: u32) -> Result<()> {
        if !self.length_prefix {
            warn!(length, "length prefix written on a writer created without one");
            return Err(Error::LengthPrefixDisabled);
        }

        self.patch(0, length)
    }

    /// Write the record type id at the header base
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the type-id slot lies past the end of the buffer.
    pub fn write_type_id(&mut self, type_id: i32) -> Result<()> {
        self.patch(self.header_base(), type_id)
    }

    /// Write a type id (or any other 4-byte header cell) at an absolute `offset`
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `offset..offset + 4` lies past the end of the buffer.
    pub fn write_type_id_at(&mut self, type_id: i32, offset: usize) -> Result<()> {
        self.patch(offset, type_id)
    }

    /// Write the size of field `field_index` into its slot of the field-size table
    ///
    /// The entry lives at `field_table_base() + field_index * 4`. Use [`VARIABLE_FIELD_SIZE`] for
    /// fields whose length is carried by the payload.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the slot lies past the end of the buffer.
    pub fn write_field_size(&mut self, field_index: usize, size: i32) -> Result<()> {
        let Some(offset) = field_index.checked_mul(FIELD_SIZE_ENTRY) else {
            return Err(Error::OutOfBounds {
                offset: usize::MAX,
                len: FIELD_SIZE_ENTRY,
                size: self.data.len(),
            });
        };

        self.write_field_size_at(offset, size)
    }

    /// Write a field size at byte `offset` relative to the start of the field-size table
    ///
    /// The explicit offset replaces the per-index slot entirely, so entries can be placed at any
    /// byte position within or next to the table.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the entry lies past the end of the buffer.
    pub fn write_field_size_at(&mut self, offset: usize, size: i32) -> Result<()> {
        let base = self.field_table_base();
        let Some(position) = base.checked_add(offset) else {
            return Err(Error::OutOfBounds {
                offset: usize::MAX,
                len: FIELD_SIZE_ENTRY,
                size: self.data.len(),
            });
        };

        self.patch(position, size)
    }

    /// Grow the buffer by exactly `extra` zeroed bytes
    ///
    /// Existing bytes keep their positions. Use this to make room for header cells that are
    /// patched later.
    ///
    /// # Panics
    /// Panics if the new size overflows `usize` or exceeds `isize::MAX` bytes, like
    /// [`Vec::resize`]. The buffer is never shrunk.
    pub fn alloc_more(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }

        let Some(size) = self.data.len().checked_add(extra) else {
            panic!(
                "NanoBuf buffer of {} bytes can not grow by {extra} bytes",
                self.data.len()
            );
        };
        trace!(extra, size, "growing NanoBuf buffer");
        self.data.resize(size, 0);
    }

    /// Append a boolean as a single byte, `1` for true and `0` for false
    pub fn append_bool(&mut self, value: bool) -> usize {
        self.append(u8::from(value))
    }

    /// Append a signed 8-bit integer
    pub fn append_i8(&mut self, value: i8) -> usize {
        self.append(value)
    }

    /// Append an unsigned 8-bit integer
    pub fn append_u8(&mut self, value: u8) -> usize {
        self.append(value)
    }

    /// Append a signed 16-bit integer
    pub fn append_i16(&mut self, value: i16) -> usize {
        self.append(value)
    }

    /// Append an unsigned 16-bit integer
    pub fn append_u16(&mut self, value: u16) -> usize {
        self.append(value)
    }

    /// Append a signed 32-bit integer
    pub fn append_i32(&mut self, value: i32) -> usize {
        self.append(value)
    }

    /// Append an unsigned 32-bit integer
    pub fn append_u32(&mut self, value: u32) -> usize {
        self.append(value)
    }

    /// Append a signed 64-bit integer
    pub fn append_i64(&mut self, value: i64) -> usize {
        self.append(value)
    }

    /// Append an unsigned 64-bit integer
    ///
    /// Shares its encoding with [`NanoBufWriter::append_i64`]: both write the 64-bit
    /// two's-complement bit pattern.
    pub fn append_u64(&mut self, value: u64) -> usize {
        self.append(value)
    }

    /// Append any integer that fits into 64 bits, signed or unsigned
    ///
    /// Accepts the range `[i64::MIN, u64::MAX]`. Negative values are written as signed, values
    /// above `i64::MAX` as unsigned; both produce the same 8 bytes a 64-bit reader of either
    /// signedness turns back into the original value.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the value needs more than 64 bits. Nothing is appended.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nanobuf::NanoBufWriter;
    ///
    /// let mut writer = NanoBufWriter::new(0);
    /// writer.append_int64(12_345_678_901_234_567_890)?;
    /// assert_eq!(writer.bytes(), &[0xd2, 0x0a, 0x1f, 0xeb, 0x8c, 0xa9, 0x54, 0xab]);
    ///
    /// assert!(writer.append_int64(i128::from(u64::MAX) + 1).is_err());
    /// assert_eq!(writer.current_size(), 8);
    /// # Ok::<(), nanobuf::Error>(())
    /// ```
    pub fn append_int64(&mut self, value: i128) -> Result<usize> {
        let bits = match (i64::try_from(value), u64::try_from(value)) {
            (Ok(signed), _) => signed as u64,
            (_, Ok(unsigned)) => unsigned,
            _ => {
                return Err(Error::Range {
                    value: value.to_string(),
                    target: "int64",
                })
            }
        };

        Ok(self.append(bits))
    }

    /// Append a 32-bit IEEE-754 float
    pub fn append_f32(&mut self, value: f32) -> usize {
        self.append(value)
    }

    /// Append a 64-bit IEEE-754 float
    pub fn append_f64(&mut self, value: f64) -> usize {
        self.append(value)
    }

    /// Append the UTF-8 bytes of `value`, without terminator or length prefix
    ///
    /// Returns the UTF-8 byte count, which is what the field-size table expects for the field.
    pub fn append_str(&mut self, value: &str) -> usize {
        self.append_bytes(value.as_bytes())
    }

    /// Append the UTF-8 byte length of `value` as a 32-bit unsigned integer, then its bytes
    ///
    /// Returns the UTF-8 byte count, not counting the 4-byte length.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the UTF-8 length does not fit into 32 bits. Nothing is
    /// appended.
    pub fn append_str_with_size(&mut self, value: &str) -> Result<usize> {
        let Ok(size) = u32::try_from(value.len()) else {
            return Err(Error::Range {
                value: value.len().to_string(),
                target: "uint32 string length",
            });
        };

        self.append(size);
        Ok(self.append_str(value))
    }

    /// Append a raw byte span verbatim
    pub fn append_bytes(&mut self, bytes: &[u8]) -> usize {
        self.data.extend_from_slice(bytes);
        bytes.len()
    }

    fn append<T: NanoIO>(&mut self, value: T) -> usize {
        self.append_bytes(value.to_le_bytes().as_ref())
    }

    fn patch<T: NanoIO>(&mut self, offset: usize, value: T) -> Result<()> {
        trace!(offset, width = T::WIDTH, "patching NanoBuf header cell");

        let mut position = offset;
        write_le_at(&mut self.data, &mut position, value)
    }
}

impl AsRef<[u8]> for NanoBufWriter {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<NanoBufWriter> for Vec<u8> {
    fn from(writer: NanoBufWriter) -> Self {
        writer.into_bytes()
    }
}
