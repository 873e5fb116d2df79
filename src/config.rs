//! Construction options for [`crate::NanoBufWriter`]
//!
//! A writer is configured once, at construction, and the options can not change afterwards:
//! whether a length prefix is reserved decides where every header cell lives.

use crate::writer::{FIELD_SIZE_ENTRY, LENGTH_PREFIX_SIZE, TYPE_ID_SIZE};

/// Options for creating a [`crate::NanoBufWriter`]
///
/// The `initial_size` is allocated zeroed and is the space available to absolute-offset header
/// writes. Reserve at least the header (`4` for the type id, plus `4` per field-size entry, plus
/// `4` when `length_prefix` is set) so that header patches never fail with
/// [`crate::Error::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterConfig {
    /// Number of zeroed bytes allocated at construction
    pub initial_size: usize,

    /// Reserve a 4-byte total length slot at offset 0, shifting the type id to offset 4
    pub length_prefix: bool,
}

impl WriterConfig {
    /// Creates a configuration without length prefix
    #[must_use]
    pub fn new(initial_size: usize) -> Self {
        Self {
            initial_size,
            length_prefix: false,
        }
    }

    /// Creates a configuration whose initial size holds exactly the header of a record with
    /// `field_count` fields
    ///
    /// ## Arguments
    /// * 'field_count'   - Number of entries in the field-size table
    /// * 'length_prefix' - Whether the record starts with a length prefix
    #[must_use]
    pub fn for_header(field_count: usize, length_prefix: bool) -> Self {
        let prefix = if length_prefix { LENGTH_PREFIX_SIZE } else { 0 };
        Self {
            initial_size: field_count
                .saturating_mul(FIELD_SIZE_ENTRY)
                .saturating_add(prefix + TYPE_ID_SIZE),
            length_prefix,
        }
    }

    /// Sets the initial size
    #[must_use]
    pub fn initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Enables or disables the length prefix
    #[must_use]
    pub fn length_prefix(mut self, enabled: bool) -> Self {
        self.length_prefix = enabled;
        self
    }
}
