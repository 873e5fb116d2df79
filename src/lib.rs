// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # nanobuf
//!
//! A growable, little-endian buffer writer for NanoBuf, a compact self-describing binary
//! record format. A record is a small header followed by a payload:
//!
//! ```text
//! [optional 4-byte length prefix]
//! [4-byte type id]
//! [4-byte field-size entry]*
//! [payload bytes]
//! ```
//!
//! The header is patched in place at known offsets, the payload is appended at the tail.
//! Reading records back is the job of a paired decoder that knows the schema (type id to field
//! layout) out of band; this crate only writes.
//!
//! ## Quick Start
//!
//! ```rust
//! use nanobuf::prelude::*;
//!
//! // A record with type id 7 and two fields: an i32 and a variable-length string
//! let mut writer = NanoBufWriter::with_config(WriterConfig::for_header(2, false));
//! writer.write_type_id(7)?;
//! writer.write_field_size(0, 4)?;
//! writer.write_field_size(1, VARIABLE_FIELD_SIZE)?;
//!
//! writer.append_i32(-5);
//! writer.append_str_with_size("nano")?;
//!
//! assert_eq!(writer.current_size(), 12 + 4 + 4 + 4);
//! let record: Vec<u8> = writer.into_bytes();
//! assert_eq!(&record[..4], &[7, 0, 0, 0]);
//! # Ok::<(), nanobuf::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`writer`] - [`NanoBufWriter`], header patching and payload appends
//! - [`config`] - [`WriterConfig`] construction options
//! - [`io`] - Bounds-checked little-endian encoding primitives
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` on construction, `trace` on growth and header
//! patches, `warn` on misconfiguration) and never installs a subscriber itself.
//!
//! ## Error Handling
//!
//! ```rust
//! use nanobuf::{Error, NanoBufWriter};
//!
//! let mut writer = NanoBufWriter::new(8);
//! match writer.write_length_prefix(8) {
//!     Ok(()) => println!("prefix written"),
//!     Err(Error::LengthPrefixDisabled) => println!("writer has no length prefix slot"),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//!
//! # Fuzz arbitrary operation sequences against the writer
//! cargo +nightly fuzz run writer --release
//! ```

pub(crate) mod error;

/// Construction options for the writer
pub mod config;

/// Little-endian encoding primitives and bounds-checked slice access
pub mod io;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use nanobuf::prelude::*;
///
/// let mut writer = NanoBufWriter::new(4);
/// writer.write_type_id(1)?;
/// # Ok::<(), nanobuf::Error>(())
/// ```
pub mod prelude;

/// The NanoBuf record writer
pub mod writer;

/// `nanobuf` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `nanobuf` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for the individual
/// conditions.
pub use error::Error;

/// Main entry point for building NanoBuf records
pub use writer::{NanoBufWriter, VARIABLE_FIELD_SIZE};

/// Construction options for [`NanoBufWriter`]
pub use config::WriterConfig;
