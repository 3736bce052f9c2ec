use crate::de::read::SliceRead;
use crate::Error;

const SIGNATURE: &[u8; 3] = b":)\n";

const RAW_BINARY: u8 = 0x04;
const SHARED_KEY_NAMES: u8 = 0x02;
const SHARED_STRING_VALUES: u8 = 0x01;

/// The capability flags carried in the fourth byte of a Smile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Whether binary values may be sent unencoded.
    pub raw_binary: bool,
    /// Whether object keys may be back-referenced.
    pub shared_key_names: bool,
    /// Whether short string values may be back-referenced.
    pub shared_string_values: bool,
}

impl Default for Header {
    /// The flags assumed before any header has been read.
    fn default() -> Self {
        Header {
            raw_binary: false,
            shared_key_names: false,
            shared_string_values: true,
        }
    }
}

impl Header {
    pub(crate) fn parse(reader: &mut SliceRead<'_>) -> Result<Self, Error> {
        let start = reader.offset();
        let signature = reader.read(SIGNATURE.len())?;
        if signature != SIGNATURE {
            return Err(Error::invalid_header(signature).at(start));
        }

        let flags = reader.next()?;
        Ok(Header::from_flags(flags))
    }

    /// Interprets a header flag byte. Bits other than the low three are ignored.
    pub fn from_flags(flags: u8) -> Self {
        Header {
            raw_binary: flags & RAW_BINARY != 0,
            shared_key_names: flags & SHARED_KEY_NAMES != 0,
            shared_string_values: flags & SHARED_STRING_VALUES != 0,
        }
    }
}
