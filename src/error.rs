use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every fallible operation of [`crate::NanoBufWriter`] reports one of these variants. A failing
/// operation never modifies the buffer, so the writer stays usable after an error.
///
/// # Error Categories
///
/// - [`Error::OutOfBounds`] - An absolute-offset write did not fit into the current buffer
/// - [`Error::LengthPrefixDisabled`] - The writer was not configured for a length prefix
/// - [`Error::Range`] - A value can not be represented in the requested encoding
///
/// # Examples
///
/// ```rust
/// use nanobuf::{Error, NanoBufWriter};
///
/// let mut writer = NanoBufWriter::new(2);
/// match writer.write_type_id(7) {
///     Ok(()) => println!("type id written"),
///     Err(Error::OutOfBounds { offset, len, size }) => {
///         eprintln!("{len} bytes at {offset} do not fit into {size} bytes");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An absolute-offset write (or a read through [`crate::io::read_le_at`]) would have touched
    /// bytes past the end of the buffer.
    ///
    /// Header patches never grow the buffer; the space has to be reserved up front through the
    /// initial size or [`crate::NanoBufWriter::alloc_more`]. The error is also reported when the
    /// target position can not be computed without overflowing `usize`.
    ///
    /// # Fields
    ///
    /// * `offset` - First byte the write would have touched
    /// * `len` - Number of bytes the write needed
    /// * `size` - Buffer size at the time of the write
    #[error("Out of Bound access would have occurred - {len} bytes at offset {offset} exceed buffer of {size} bytes")]
    OutOfBounds {
        /// Absolute position of the attempted write
        offset: usize,
        /// Width of the attempted write
        len: usize,
        /// Size of the buffer when the write was attempted
        size: usize,
    },

    /// The length prefix was written on a writer that was created without one.
    ///
    /// Without the prefix, offset 0 belongs to the type id; writing a length there would
    /// silently corrupt the header.
    #[error("Length prefixing is not enabled for this writer")]
    LengthPrefixDisabled,

    /// A value does not fit into the target encoding.
    ///
    /// Raised for 64-bit appends of values outside `[i64::MIN, u64::MAX]` and for strings whose
    /// UTF-8 length does not fit into the 32-bit size prefix.
    ///
    /// # Fields
    ///
    /// * `value` - The rejected value, rendered for diagnostics
    /// * `target` - Name of the encoding that could not hold it
    #[error("Value {value} can not be represented as {target}")]
    Range {
        /// The rejected value
        value: String,
        /// The encoding that was requested
        target: &'static str,
    },
}
