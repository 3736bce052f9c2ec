//! A decoder for the Smile binary data format.
//!
//! [Smile] is a binary data format created by the developers of the Jackson serialization library for Java. It is
//! designed to be a binary equivalent of JSON: single-byte tokens, variable-length integers, and back-references
//! that let repeated short strings be sent as a one- or two-byte table index.
//!
//! This crate decodes a complete in-memory Smile buffer into a [`Value`] tree. It does not encode.
//!
//! # Header Flags
//!
//! Every Smile document starts with the signature `:)\n` followed by a flag byte:
//!
//! * `0x04` (raw binary): binary values may be sent unencoded.
//! * `0x02` (shared key names): object keys of 64 bytes or fewer are remembered and may be back-referenced.
//! * `0x01` (shared string values): string values of 64 bytes or fewer are remembered and may be back-referenced.
//!
//! Each shared table holds at most 1024 strings. Once full, the next string clears the table before it is added.
//!
//! # Decoding Notes
//!
//! * Object entries are returned sorted by key, regardless of the order in which they were encoded.
//! * `BigInteger` values are decoded as unsigned magnitudes.
//! * The text encoding of "Unicode" string tokens is configurable through [`Builder::text_encoding`], and defaults
//!     to UTF-8.
//!
//! # Examples
//!
//! Decode a Smile document into a [`Value`]:
//! ```rust
//! use smile_decode::{Error, Value};
//!
//! fn main() -> Result<(), Error> {
//!     let smile = b":)\n\x03\xf8\x41ab\x01\xf9";
//!
//!     let value = smile_decode::decode(smile)?;
//!
//!     assert_eq!(
//!         value,
//!         Value::Array(vec![Value::String("ab".to_string()), Value::String("ab".to_string())]),
//!     );
//!     Ok(())
//! }
//! ```
//!
//! Decode a Smile document into a Rust object:
//! ```rust
//! use serde::Deserialize;
//! use smile_decode::Error;
//!
//! #[derive(Deserialize)]
//! struct Address {
//!     number: u32,
//!     street: String,
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let smile = b":)\n\x00\xfa\x85number\x24\x32\x80\x85street\x52Pennsylvania Avenue\xfb";
//!
//!     let address: Address = smile_decode::from_slice(smile)?;
//!
//!     println!("{} {}", address.number, address.street);
//!
//!     Ok(())
//! }
//! ```
//!
//! [Smile]: https://github.com/FasterXML/smile-format-specification
//! [`Value`]: value::Value
//! [`Builder::text_encoding`]: de::Builder::text_encoding
#![warn(missing_docs)]

#[doc(inline)]
pub use de::{decode, from_slice, Builder, Decoder, Header, StreamDecoder, TextEncoding};
#[doc(inline)]
pub use error::{Error, ErrorKind, SharedTable};
#[doc(inline)]
pub use value::Value;

pub mod de;
mod error;
pub mod value;
