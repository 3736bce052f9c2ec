use crate::error::SharedTable;
use crate::Error;

const LIMIT: usize = 1024;

/// Strings longer than this many encoded bytes are never shared.
pub(crate) const MAX_SHARED_LEN: usize = 64;

/// A back-reference table. Once full, the next insertion clears it entirely.
pub(crate) struct StringCache {
    table: SharedTable,
    vec: Vec<String>,
}

impl StringCache {
    pub fn new(table: SharedTable) -> Self {
        StringCache { table, vec: vec![] }
    }

    /// Registers a string whose encoded form was `encoded_len` bytes long.
    pub fn intern(&mut self, s: &str, encoded_len: usize) {
        if encoded_len > MAX_SHARED_LEN {
            return;
        }

        if self.vec.len() >= LIMIT {
            tracing::debug!(table = %self.table, "shared table full, resetting");
            self.vec.clear();
        }

        self.vec.push(s.to_string());
    }

    pub fn get(&self, reference: usize) -> Result<&str, Error> {
        self.vec
            .get(reference)
            .map(|s| &**s)
            .ok_or_else(|| {
                Error::invalid_reference(self.table, reference as isize, self.vec.len())
            })
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }
}
