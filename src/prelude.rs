//! # nanobuf Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the nanobuf
//! library. Import this module to get quick access to everything needed for writing records.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all nanobuf operations
pub use crate::Error;

/// The result type used throughout nanobuf
pub use crate::Result;

// ================================================================================================
// Writer
// ================================================================================================

/// Record writer and its construction options
pub use crate::{NanoBufWriter, WriterConfig};

/// Field size for fields whose length is carried by the payload
pub use crate::VARIABLE_FIELD_SIZE;

// ================================================================================================
// Encoding Primitives
// ================================================================================================

/// Little-endian conversion trait and bounds-checked helpers
pub use crate::io::{read_le, read_le_at, write_le, write_le_at, NanoIO};
