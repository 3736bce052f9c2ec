use crate::de::read::SliceRead;
use crate::Error;
use num_bigint::BigUint;
use std::convert::TryFrom;

/// Reads a VInt: 7 payload bits per byte with the high bit clear, then a terminating byte with the high bit set
/// carrying 6 more.
pub(crate) fn parse_vint(reader: &mut SliceRead<'_>, byte_limit: usize) -> Result<u64, Error> {
    let start = reader.offset();
    let mut value = 0u64;
    for _ in 0..byte_limit {
        let byte = reader.next()?;
        let end = byte & 0x80 != 0;

        let (shift, mask): (u32, u8) = if end { (6, 0x3f) } else { (7, 0x7f) };
        if value >> (64 - shift) != 0 {
            return Err(Error::number_out_of_range().at(start));
        }
        value = value << shift | (byte & mask) as u64;

        if end {
            return Ok(value);
        }
    }

    Err(Error::unterminated_vint().at(start))
}

#[inline]
pub(crate) fn zigzag_i32(v: u32) -> i32 {
    ((v >> 1) as i32) ^ (-((v & 1) as i32))
}

#[inline]
pub(crate) fn zigzag_i64(v: u64) -> i64 {
    ((v >> 1) as i64) ^ (-((v & 1) as i64))
}

/// Decodes the value carried in the low 5 bits of a small integer token.
#[inline]
pub(crate) fn small_int(token: u8) -> i32 {
    zigzag_i32((token & 0x1f) as u32)
}

/// Reads an unsigned big integer: a VInt byte length followed by the value's bits packed 7 to a byte, the final
/// byte holding the `8 * length mod 7` leftover bits.
pub(crate) fn parse_big_integer(
    reader: &mut SliceRead<'_>,
    byte_limit: usize,
) -> Result<BigUint, Error> {
    let start = reader.offset();
    let length = parse_vint(reader, byte_limit)?;
    let bits = usize::try_from(length)
        .ok()
        .and_then(|l| l.checked_mul(8))
        .ok_or_else(|| Error::number_out_of_range().at(start))?;

    let remain = bits % 7;
    let full_groups = (bits - remain) / 7;

    let groups = reader.read(full_groups)?;
    let tail = if remain > 0 { reader.next()? & 0x7f } else { 0 };

    // Each group is ORed in at its final bit position. Group bytes are not masked and may overlap the low bit of the
    // group before them.
    let mut words = vec![0u32; bits / 32 + 2];
    for (i, &byte) in groups.iter().enumerate() {
        or_bits(&mut words, remain + 7 * (full_groups - 1 - i), byte);
    }
    or_bits(&mut words, 0, tail);

    Ok(BigUint::new(words))
}

fn or_bits(words: &mut [u32], offset: usize, byte: u8) {
    let (word, shift) = (offset / 32, offset % 32);
    words[word] |= (byte as u32) << shift;
    if shift > 24 {
        words[word + 1] |= (byte as u32) >> (32 - shift);
    }
}

/// Reads a 32-bit float packed into 5 bytes of 7 bits each, least significant group first.
pub(crate) fn parse_f32(reader: &mut SliceRead<'_>) -> Result<f32, Error> {
    let start = reader.offset();
    let buf = reader.read(5)?;
    let raw = buf.iter().rev().fold(0u64, |acc, &b| acc << 7 | b as u64);
    let raw = u32::try_from(raw).map_err(|_| Error::number_out_of_range().at(start))?;
    Ok(f32::from_bits(raw))
}

/// Reads a 64-bit float packed into 10 bytes of 7 bits each, most significant group first.
pub(crate) fn parse_f64(reader: &mut SliceRead<'_>) -> Result<f64, Error> {
    let start = reader.offset();
    let buf = reader.read(10)?;
    let raw = buf.iter().fold(0u128, |acc, &b| acc << 7 | b as u128);
    let raw = u64::try_from(raw).map_err(|_| Error::number_out_of_range().at(start))?;
    Ok(f64::from_bits(raw))
}
