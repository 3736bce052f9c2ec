use crate::de::TextEncoding;
use serde::de;
use std::{error, fmt};

/// Identifies one of the two back-reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedTable {
    /// The shared object key table.
    Keys,
    /// The shared string value table.
    Values,
}

impl fmt::Display for SharedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharedTable::Keys => f.write_str("key"),
            SharedTable::Values => f.write_str("value"),
        }
    }
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The first three bytes were not `:)\n`.
    InvalidHeader {
        /// The bytes found in place of the signature.
        found: Vec<u8>,
    },
    /// A token in a range reserved by the format.
    ReservedToken {
        /// The offending token.
        token: u8,
    },
    /// A token with no assigned meaning.
    UnknownToken {
        /// The offending token.
        token: u8,
    },
    /// A back-reference was found but the header did not enable sharing for its table.
    SharingNotEnabled {
        /// The table the reference pointed into.
        table: SharedTable,
    },
    /// A back-reference index outside of the table's current contents.
    InvalidReference {
        /// The table the reference pointed into.
        table: SharedTable,
        /// The requested index. Value token `0x00` refers to index -1.
        index: isize,
        /// The number of entries in the table at the time of the reference.
        len: usize,
    },
    /// The input ended before a complete value was read.
    TruncatedInput {
        /// The number of bytes the read required.
        needed: usize,
        /// The number of bytes left in the input.
        available: usize,
    },
    /// String bytes were not valid in the declared encoding.
    InvalidText {
        /// The encoding the bytes were decoded with.
        encoding: TextEncoding,
    },
    /// A VInt ran past the configured byte limit without a terminating byte.
    UnterminatedVint,
    /// A number did not fit in its target width.
    NumberOutOfRange,
    /// Arrays and objects were nested deeper than the configured limit.
    RecursionLimitExceeded,
    /// A long non-shared key name was found while such keys are disabled.
    LongKeyName,
    /// A custom error produced while converting a value.
    Custom(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidHeader { found } => {
                write!(f, "invalid header (expected `:)\\n`, found {:?})", found)
            }
            ErrorKind::ReservedToken { token } => write!(f, "reserved token 0x{:02x}", token),
            ErrorKind::UnknownToken { token } => write!(f, "unknown token 0x{:02x}", token),
            ErrorKind::SharingNotEnabled { table } => {
                write!(f, "shared {} references are not enabled", table)
            }
            ErrorKind::InvalidReference { table, index, len } => write!(
                f,
                "invalid shared {} reference {} (table holds {} entries)",
                table, index, len
            ),
            ErrorKind::TruncatedInput { needed, available } => write!(
                f,
                "truncated input (needed {} bytes, {} available)",
                needed, available
            ),
            ErrorKind::InvalidText { encoding } => write!(f, "invalid {} text", encoding),
            ErrorKind::UnterminatedVint => f.write_str("unterminated vint"),
            ErrorKind::NumberOutOfRange => f.write_str("number out of range"),
            ErrorKind::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
            ErrorKind::LongKeyName => f.write_str("long non-shared key names are not enabled"),
            ErrorKind::Custom(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug)]
struct ErrorImpl {
    kind: ErrorKind,
    offset: Option<usize>,
}

/// An error encountered when decoding Smile data.
#[derive(Debug)]
pub struct Error(Box<ErrorImpl>);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.offset {
            Some(offset) => write!(f, "{} at offset {}", self.0.kind, offset),
            None => fmt::Display::fmt(&self.0.kind, f),
        }
    }
}

impl error::Error for Error {}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Error::new(ErrorKind::Custom(msg.to_string()))
    }
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Error(Box::new(ErrorImpl { kind, offset: None }))
    }

    /// Returns the category of the error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    /// Returns the byte offset into the input at which the error was detected, if known.
    pub fn offset(&self) -> Option<usize> {
        self.0.offset
    }

    pub(crate) fn at(mut self, offset: usize) -> Self {
        if self.0.offset.is_none() {
            self.0.offset = Some(offset);
        }
        self
    }

    pub(crate) fn invalid_header(found: &[u8]) -> Self {
        Error::new(ErrorKind::InvalidHeader {
            found: found.to_vec(),
        })
    }

    pub(crate) fn reserved_token(token: u8) -> Self {
        Error::new(ErrorKind::ReservedToken { token })
    }

    pub(crate) fn unknown_token(token: u8) -> Self {
        Error::new(ErrorKind::UnknownToken { token })
    }

    pub(crate) fn sharing_not_enabled(table: SharedTable) -> Self {
        Error::new(ErrorKind::SharingNotEnabled { table })
    }

    pub(crate) fn invalid_reference(table: SharedTable, index: isize, len: usize) -> Self {
        Error::new(ErrorKind::InvalidReference { table, index, len })
    }

    pub(crate) fn truncated_input(needed: usize, available: usize) -> Self {
        Error::new(ErrorKind::TruncatedInput { needed, available })
    }

    pub(crate) fn invalid_text(encoding: TextEncoding) -> Self {
        Error::new(ErrorKind::InvalidText { encoding })
    }

    pub(crate) fn unterminated_vint() -> Self {
        Error::new(ErrorKind::UnterminatedVint)
    }

    pub(crate) fn number_out_of_range() -> Self {
        Error::new(ErrorKind::NumberOutOfRange)
    }

    pub(crate) fn recursion_limit_exceeded() -> Self {
        Error::new(ErrorKind::RecursionLimitExceeded)
    }

    pub(crate) fn long_key_name() -> Self {
        Error::new(ErrorKind::LongKeyName)
    }
}
