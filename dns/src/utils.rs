use byteorder::{ByteOrder, BE};

use crate::error::DecodeError;

// top two bits of a label length octet marking a compression pointer
pub const POINTER_MASK: u8 = 0b1100_0000;

/// A value decoded from the message along with the offset of the first byte after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub item: T,
    pub next_offset: usize,
}

impl<T> Parsed<T> {
    pub fn new(item: T, next_offset: usize) -> Self {
        Self { item, next_offset }
    }
}

pub fn is_bit_set(b: u8, bit: u8) -> bool {
    b & (1 << bit) != 0
}

pub fn is_label_pointer(b: u8) -> bool {
    b & POINTER_MASK == POINTER_MASK
}

/// Borrows `len` bytes starting at `offset`.
pub fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(DecodeError::Truncated {
            offset,
            needed: len,
            available: data.len().saturating_sub(offset),
        })
}

pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, DecodeError> {
    Ok(slice_at(data, offset, 1)?[0])
}

pub fn read_u16(data: &[u8], offset: usize) -> Result<u16, DecodeError> {
    slice_at(data, offset, 2).map(BE::read_u16)
}

pub fn read_u32(data: &[u8], offset: usize) -> Result<u32, DecodeError> {
    slice_at(data, offset, 4).map(BE::read_u32)
}

/// `len` bytes at `offset` as text. Every byte must be ASCII, so the text
/// encodes back to the same bytes.
pub fn ascii_at(data: &[u8], offset: usize, len: usize) -> Result<String, DecodeError> {
    let bytes = slice_at(data, offset, len)?;

    if let Some(position) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(DecodeError::NonAsciiText {
            offset: offset + position,
        });
    }

    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

/// Writes `value` big-endian into `buf[offset..offset + 2]`; the caller sizes `buf`.
pub fn write_u16(buf: &mut [u8], offset: usize, value: u16) {
    BE::write_u16(&mut buf[offset..offset + 2], value);
}
