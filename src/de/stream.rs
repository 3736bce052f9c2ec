use crate::de::{Decoder, Header, Parser};
use crate::value::Value;
use crate::Error;

/// An iterator that decodes a buffer into multiple Smile values.
///
/// A stream decoder is created with [`Decoder::decode_stream`].
///
/// The iterator will stop at either the Smile end-of-stream marker or the end of the buffer.
pub struct StreamDecoder<'a> {
    decoder: &'a Decoder,
    slice: &'a [u8],
    parser: Option<Parser<'a>>,
    done: bool,
}

impl<'a> StreamDecoder<'a> {
    pub(crate) fn new(decoder: &'a Decoder, slice: &'a [u8]) -> Self {
        StreamDecoder {
            decoder,
            slice,
            parser: None,
            done: false,
        }
    }

    /// Returns the stream's header, once it has been read by the first call to `next`.
    pub fn header(&self) -> Option<Header> {
        self.parser.as_ref().map(|p| p.header)
    }

    /// Returns the offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.parser.as_ref().map_or(0, |p| p.reader.offset())
    }
}

impl Iterator for StreamDecoder<'_> {
    type Item = Result<Value, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.parser.is_none() {
            match Parser::new(self.decoder, self.slice) {
                Ok(parser) => self.parser = Some(parser),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        let parser = self.parser.as_mut()?;

        match parser.reader.peek_opt() {
            Some(0xff) => {
                parser.reader.consume();
                self.done = true;
                return None;
            }
            Some(_) => {}
            None => {
                self.done = true;
                return None;
            }
        }

        match parser.parse_value() {
            Ok(value) => Some(Ok(value)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
