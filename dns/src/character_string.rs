// <character-string>, RFC 1035 section 3.3: one length octet followed by that many bytes.

use bytes::{BufMut, BytesMut};

use crate::error::{DecodeError, EncodeError};
use crate::utils::{ascii_at, read_u8, Parsed};

pub const MAX_CHARACTER_STRING_LEN: usize = 255;

pub fn decode_at(data: &[u8], offset: usize) -> Result<Parsed<String>, DecodeError> {
    let length = read_u8(data, offset)? as usize;
    let start = offset + 1;
    let available = data.len() - start;

    if length > available {
        return Err(DecodeError::MalformedLength {
            offset,
            declared: length,
            available,
        });
    }

    let text = ascii_at(data, start, length)?;
    Ok(Parsed::new(text, start + length))
}

pub fn encoded_len(text: &str) -> usize {
    text.len() + 1
}

pub fn encode(text: &str, bytes: &mut BytesMut) -> Result<(), EncodeError> {
    if !text.is_ascii() {
        return Err(EncodeError::NonAscii {
            text: text.to_string(),
        });
    }
    if text.len() > MAX_CHARACTER_STRING_LEN {
        return Err(EncodeError::CharacterStringTooLong { length: text.len() });
    }

    bytes.reserve(encoded_len(text));
    bytes.put_u8(text.len() as u8);
    bytes.put_slice(text.as_bytes());

    Ok(())
}
