use crate::Error;
use memchr::memchr;

/// A bounds-checked read position into an immutable byte buffer.
pub(crate) struct SliceRead<'a> {
    slice: &'a [u8],
    index: usize,
}

impl<'a> SliceRead<'a> {
    pub fn new(slice: &'a [u8]) -> Self {
        SliceRead { slice, index: 0 }
    }

    /// The offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.slice.len() - self.index
    }

    #[inline]
    pub fn next(&mut self) -> Result<u8, Error> {
        let b = self.peek()?;
        self.index += 1;
        Ok(b)
    }

    #[inline]
    pub fn peek(&self) -> Result<u8, Error> {
        self.slice
            .get(self.index)
            .copied()
            .ok_or_else(|| Error::truncated_input(1, 0).at(self.index))
    }

    /// Like `peek`, but reports the end of the buffer as `None`.
    #[inline]
    pub fn peek_opt(&self) -> Option<u8> {
        self.slice.get(self.index).copied()
    }

    #[inline]
    pub fn consume(&mut self) {
        self.index += 1;
    }

    #[inline]
    pub fn read(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let s = &self.slice[self.index..];
        if n <= s.len() {
            self.index += n;
            Ok(&s[..n])
        } else {
            Err(Error::truncated_input(n, s.len()).at(self.index))
        }
    }

    /// Reads up to the next `end` byte, consuming but not returning it.
    pub fn read_until(&mut self, end: u8) -> Result<&'a [u8], Error> {
        let s = &self.slice[self.index..];
        match memchr(end, s) {
            Some(end) => {
                self.index += end + 1;
                Ok(&s[..end])
            }
            None => Err(Error::truncated_input(s.len() + 1, s.len()).at(self.index)),
        }
    }
}
