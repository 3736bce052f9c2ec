//! Decode Smile data into a value tree.
pub use crate::de::header::Header;
use crate::de::read::SliceRead;
pub use crate::de::stream::StreamDecoder;
use crate::de::string_cache::StringCache;
pub use crate::de::text::TextEncoding;
use crate::error::SharedTable;
use crate::value::{from_value, BigInteger, Value};
use crate::Error;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::convert::TryFrom;

mod header;
mod number;
mod read;
mod stream;
mod string_cache;
mod text;

/// Decodes one Smile value from a slice using default decoder settings.
pub fn decode(slice: &[u8]) -> Result<Value, Error> {
    Decoder::new().decode(slice)
}

/// Decodes one Smile value from a slice and interprets it as an instance of type `T`.
pub fn from_slice<T>(slice: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let value = decode(slice)?;
    from_value(value)
}

/// A builder to configure a [`Decoder`].
#[derive(Clone, Debug)]
pub struct Builder {
    text_encoding: TextEncoding,
    max_depth: usize,
    max_vint_bytes: usize,
    long_key_names: bool,
}

impl Builder {
    /// Sets the encoding used to decode the format's "Unicode" string tokens.
    ///
    /// ASCII string tokens are always decoded as 7-bit ASCII.
    ///
    /// Defaults to [`TextEncoding::Utf8`].
    pub fn text_encoding(&mut self, text_encoding: TextEncoding) -> &mut Self {
        self.text_encoding = text_encoding;
        self
    }

    /// Sets the maximum nesting depth of arrays and objects.
    ///
    /// Defaults to 128.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum number of bytes in a single variable-length integer.
    ///
    /// Defaults to 10.
    pub fn max_vint_bytes(&mut self, max_vint_bytes: usize) -> &mut Self {
        self.max_vint_bytes = max_vint_bytes;
        self
    }

    /// Accepts non-shared long key names (key token `0x34`), using the decoded name as the key.
    ///
    /// When disabled, such keys fail with [`ErrorKind::LongKeyName`](crate::ErrorKind::LongKeyName).
    ///
    /// Defaults to `false`.
    pub fn long_key_names(&mut self, long_key_names: bool) -> &mut Self {
        self.long_key_names = long_key_names;
        self
    }

    /// Creates a new [`Decoder`].
    pub fn build(&self) -> Decoder {
        Decoder {
            text_encoding: self.text_encoding,
            max_depth: self.max_depth,
            max_vint_bytes: self.max_vint_bytes,
            long_key_names: self.long_key_names,
        }
    }
}

/// A reusable, immutable Smile decoder.
///
/// All state tied to a single input, such as the shared string tables, lives only for the duration of a call, so
/// one `Decoder` can be used for any number of independent buffers, including concurrently.
#[derive(Clone, Debug)]
pub struct Decoder {
    text_encoding: TextEncoding,
    max_depth: usize,
    max_vint_bytes: usize,
    long_key_names: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

impl Decoder {
    /// Returns a builder used to configure a `Decoder`.
    pub fn builder() -> Builder {
        Builder {
            text_encoding: TextEncoding::Utf8,
            max_depth: 128,
            max_vint_bytes: 10,
            long_key_names: false,
        }
    }

    /// Creates a new `Decoder` with default settings.
    pub fn new() -> Self {
        Decoder::builder().build()
    }

    /// Returns the encoding used for "Unicode" string tokens.
    pub fn text_encoding(&self) -> TextEncoding {
        self.text_encoding
    }

    /// Decodes the header and the first value of a buffer.
    ///
    /// Any bytes following the first value are ignored.
    pub fn decode(&self, slice: &[u8]) -> Result<Value, Error> {
        self.decode_with_header(slice).map(|(_, value)| value)
    }

    /// Like [`Self::decode`], but also returns the parsed header.
    pub fn decode_with_header(&self, slice: &[u8]) -> Result<(Header, Value), Error> {
        let _span = tracing::debug_span!("smile_decode", len = slice.len()).entered();

        let mut parser = Parser::new(self, slice)?;
        let value = parser.parse_value()?;

        tracing::debug!(
            consumed = parser.reader.offset(),
            trailing = parser.reader.remaining(),
            "smile value decoded"
        );
        Ok((parser.header, value))
    }

    /// Returns an iterator over the consecutive top-level values of a buffer.
    ///
    /// The header is read once and the shared string tables persist from one value to the next. Iteration stops at
    /// the end of the buffer, at the end-of-stream marker `0xff`, or after the first error.
    pub fn decode_stream<'a>(&'a self, slice: &'a [u8]) -> StreamDecoder<'a> {
        StreamDecoder::new(self, slice)
    }
}

/// The state of a single decode call.
pub(crate) struct Parser<'a> {
    config: &'a Decoder,
    reader: SliceRead<'a>,
    header: Header,
    remaining_depth: usize,
    shared_strings: Option<StringCache>,
    shared_properties: Option<StringCache>,
}

impl<'a> Parser<'a> {
    pub fn new(config: &'a Decoder, slice: &'a [u8]) -> Result<Self, Error> {
        let mut reader = SliceRead::new(slice);
        let header = Header::parse(&mut reader)?;

        tracing::debug!(
            raw_binary = header.raw_binary,
            shared_key_names = header.shared_key_names,
            shared_string_values = header.shared_string_values,
            "smile header parsed"
        );

        Ok(Parser {
            config,
            reader,
            header,
            remaining_depth: config.max_depth,
            shared_strings: if header.shared_string_values {
                Some(StringCache::new(SharedTable::Values))
            } else {
                None
            },
            shared_properties: if header.shared_key_names {
                Some(StringCache::new(SharedTable::Keys))
            } else {
                None
            },
        })
    }

    fn recursion_checked<F, T>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'a>) -> Result<T, Error>,
    {
        if self.remaining_depth == 0 {
            return Err(Error::recursion_limit_exceeded());
        }
        self.remaining_depth -= 1;
        let r = f(self);
        self.remaining_depth += 1;
        r
    }

    fn cache(&self, table: SharedTable) -> Result<&StringCache, Error> {
        let cache = match table {
            SharedTable::Keys => &self.shared_properties,
            SharedTable::Values => &self.shared_strings,
        };
        cache
            .as_ref()
            .ok_or_else(|| Error::sharing_not_enabled(table))
    }

    fn parse_shared_str(&self, table: SharedTable, reference: usize) -> Result<String, Error> {
        self.cache(table)?.get(reference).map(str::to_string)
    }

    fn parse_long_shared_str(&mut self, table: SharedTable, token: u8) -> Result<String, Error> {
        self.cache(table)?;
        let reference_lo = self.reader.next()?;
        let reference = ((token & 0x03) as usize) << 8 | reference_lo as usize;
        self.parse_shared_str(table, reference)
    }

    fn parse_short_str(
        &mut self,
        table: SharedTable,
        len: usize,
        encoding: TextEncoding,
    ) -> Result<String, Error> {
        let buf = self.reader.read(len)?;
        let s = encoding.decode(buf)?;

        let cache = match table {
            SharedTable::Keys => &mut self.shared_properties,
            SharedTable::Values => &mut self.shared_strings,
        };
        if let Some(cache) = cache {
            cache.intern(&s, buf.len());
        }

        Ok(s)
    }

    fn parse_long_str(&mut self, encoding: TextEncoding) -> Result<String, Error> {
        let buf = self.reader.read_until(0xfc)?;
        encoding.decode(buf)
    }

    fn parse_vint(&mut self) -> Result<u64, Error> {
        number::parse_vint(&mut self.reader, self.config.max_vint_bytes)
    }

    fn parse_int(&mut self) -> Result<Value, Error> {
        let v = number::zigzag_i64(self.parse_vint()?);
        let value = match i32::try_from(v) {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Long(v),
        };
        Ok(value)
    }

    fn parse_raw_binary(&mut self) -> Result<Value, Error> {
        let len = self.parse_vint()?;
        let len = usize::try_from(len).map_err(|_| Error::number_out_of_range())?;
        let buf = self.reader.read(len)?;
        Ok(Value::Binary(buf.to_vec()))
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        self.recursion_checked(|p| {
            let mut vec = vec![];
            while p.reader.peek()? != 0xf9 {
                vec.push(p.parse_value()?);
            }
            p.reader.consume();
            Ok(Value::Array(vec))
        })
    }

    fn parse_object(&mut self) -> Result<Value, Error> {
        self.recursion_checked(|p| {
            let mut map = IndexMap::new();
            while p.reader.peek()? != 0xfb {
                let key = p.parse_key()?;
                let value = p.parse_value()?;
                map.insert(key, value);
            }
            p.reader.consume();

            map.sort_keys();
            Ok(Value::Object(map))
        })
    }

    pub fn parse_value(&mut self) -> Result<Value, Error> {
        let start = self.reader.offset();
        let token = self.reader.next()?;
        self.parse_value_token(token).map_err(|e| e.at(start))
    }

    fn parse_value_token(&mut self, token: u8) -> Result<Value, Error> {
        let unicode = self.config.text_encoding;
        let values = SharedTable::Values;

        match token {
            0x00 => {
                let len = self.cache(values)?.len();
                Err(Error::invalid_reference(values, -1, len))
            }
            0x01..=0x1f => self
                .parse_shared_str(values, token as usize - 1)
                .map(Value::String),
            0x20 => Ok(Value::String(String::new())),
            0x21 => Ok(Value::Null),
            0x22 => Ok(Value::Boolean(false)),
            0x23 => Ok(Value::Boolean(true)),
            0x24 => self.parse_int(),
            0x25 => Ok(Value::Long(number::zigzag_i64(self.parse_vint()?))),
            0x26 => {
                let v = number::parse_big_integer(&mut self.reader, self.config.max_vint_bytes)?;
                Ok(Value::BigInteger(BigInteger::new(v)))
            }
            0x27 => Err(Error::reserved_token(token)),
            0x28 => number::parse_f32(&mut self.reader).map(Value::Float),
            0x29 => number::parse_f64(&mut self.reader).map(Value::Double),
            0x40..=0x5f => self
                .parse_short_str(values, (token & 0x1f) as usize + 1, TextEncoding::Ascii)
                .map(Value::String),
            0x60..=0x7f => self
                .parse_short_str(values, (token & 0x1f) as usize + 33, TextEncoding::Ascii)
                .map(Value::String),
            0x80..=0x9f => self
                .parse_short_str(values, (token & 0x1f) as usize + 2, unicode)
                .map(Value::String),
            0xa0..=0xbf => self
                .parse_short_str(values, (token & 0x1f) as usize + 34, unicode)
                .map(Value::String),
            0xc0..=0xdf => Ok(Value::Integer(number::small_int(token))),
            0xe0 => self.parse_long_str(TextEncoding::Ascii).map(Value::String),
            0xe4 => self.parse_long_str(unicode).map(Value::String),
            0xec..=0xef => self
                .parse_long_shared_str(values, token)
                .map(Value::String),
            0xf8 => self.parse_array(),
            0xfa => self.parse_object(),
            0xfd => self.parse_raw_binary(),
            _ => Err(Error::unknown_token(token)),
        }
    }

    fn parse_key(&mut self) -> Result<String, Error> {
        let start = self.reader.offset();
        let token = self.reader.next()?;
        self.parse_key_token(token).map_err(|e| e.at(start))
    }

    fn parse_key_token(&mut self, token: u8) -> Result<String, Error> {
        let keys = SharedTable::Keys;

        match token {
            0x00..=0x1f | 0x21..=0x2f => Err(Error::reserved_token(token)),
            0x20 => Ok(String::new()),
            0x30..=0x33 => self.parse_long_shared_str(keys, token),
            0x34 => {
                let name = self.parse_long_str(self.config.text_encoding)?;
                if self.config.long_key_names {
                    Ok(name)
                } else {
                    Err(Error::long_key_name())
                }
            }
            0x40..=0x7f => self.parse_shared_str(keys, (token - 0x40) as usize),
            0x80..=0xbf => {
                self.parse_short_str(keys, (token - 0x80) as usize + 1, TextEncoding::Ascii)
            }
            0xc0..=0xf7 => {
                let unicode = self.config.text_encoding;
                self.parse_short_str(keys, (token - 0xc0) as usize + 2, unicode)
            }
            _ => Err(Error::unknown_token(token)),
        }
    }
}
