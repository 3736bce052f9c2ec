use crate::Error;
use std::fmt;
use std::str;

/// A text encoding used to decode string tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict 7-bit ASCII. Always used for the format's ASCII string tokens.
    Ascii,
    /// UTF-8.
    Utf8,
    /// Big-endian UTF-16.
    Utf16Be,
    /// Little-endian UTF-16.
    Utf16Le,
    /// ISO-8859-1, mapping every byte to the code point of the same value.
    Latin1,
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Utf8
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextEncoding::Ascii => "ASCII",
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Be => "UTF-16BE",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Latin1 => "ISO-8859-1",
        };
        f.write_str(name)
    }
}

impl TextEncoding {
    pub(crate) fn decode(self, buf: &[u8]) -> Result<String, Error> {
        match self {
            TextEncoding::Ascii => {
                if !buf.is_ascii() {
                    return Err(Error::invalid_text(self));
                }
                self.decode_utf8(buf)
            }
            TextEncoding::Utf8 => self.decode_utf8(buf),
            TextEncoding::Utf16Be => self.decode_utf16(buf, u16::from_be_bytes),
            TextEncoding::Utf16Le => self.decode_utf16(buf, u16::from_le_bytes),
            TextEncoding::Latin1 => Ok(buf.iter().map(|&b| b as char).collect()),
        }
    }

    fn decode_utf8(self, buf: &[u8]) -> Result<String, Error> {
        str::from_utf8(buf)
            .map(str::to_string)
            .map_err(|_| Error::invalid_text(self))
    }

    fn decode_utf16(self, buf: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, Error> {
        if buf.len() % 2 != 0 {
            return Err(Error::invalid_text(self));
        }

        let units = buf.chunks_exact(2).map(|c| unit([c[0], c[1]]));
        char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .map_err(|_| Error::invalid_text(self))
    }
}
