//! Domain names in wire format, RFC 1035 section 3.1 and 4.1.4.
//!
//! Decoding never follows compression pointers: [`DomainNameDecoder`] reports a
//! pointer as the final [`DecodedLabel`] of a name and leaves the expansion to
//! [`LabelOffsetTable`](crate::label_offsets::LabelOffsetTable), which remembers
//! every label sequence seen so far in the message.
//!
//! Encoding always writes the full, uncompressed label sequence.

use bytes::{BufMut, BytesMut};

use crate::error::{DecodeError, EncodeError};
use crate::utils::{ascii_at, is_label_pointer, read_u16, Parsed};

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_OFFSET_MASK: u16 = 0x3fff;

/// An ordinary label found at `offset` (its length octet). `text` is `None`
/// for the zero-length root label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueLabel {
    pub offset: usize,
    pub text: Option<String>,
}

impl ValueLabel {
    pub fn new(offset: usize, text: &str) -> Self {
        Self {
            offset,
            text: Some(text.to_string()),
        }
    }

    pub fn root(offset: usize) -> Self {
        Self { offset, text: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLabel {
    Value(ValueLabel),
    /// A compression pointer at `offset` referring back to `target`.
    Pointer { offset: usize, target: usize },
}

impl DecodedLabel {
    pub fn offset(&self) -> usize {
        match self {
            DecodedLabel::Value(label) => label.offset,
            DecodedLabel::Pointer { offset, .. } => *offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDomainName {
    /// Offset of the first length octet.
    pub start_offset: usize,
    /// Exclusive: the first byte after the null octet or after the pointer.
    pub end_offset: usize,
    pub labels: Vec<DecodedLabel>,
}

enum Terminator {
    Null(usize),
    // offset of the first of the two pointer bytes
    Pointer(usize),
}

/// Wraps the whole message and never mutates it, so names can be decoded from
/// any offset, including ones inside RDATA.
#[derive(Debug, Clone, Copy)]
pub struct DomainNameDecoder<'a> {
    data: &'a [u8],
}

impl<'a> DomainNameDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn decode_starting_at(&self, offset: usize) -> Result<ParsedDomainName, DecodeError> {
        let terminator = self.find_text_end_from(offset)?;

        let (labels_end, domain_name_end) = match terminator {
            Terminator::Null(end) => (end, end),
            Terminator::Pointer(end) => (end, end + 1),
        };

        if offset == domain_name_end {
            return Ok(ParsedDomainName {
                start_offset: offset,
                end_offset: domain_name_end + 1,
                labels: vec![DecodedLabel::Value(ValueLabel::root(offset))],
            });
        }

        let mut labels = Vec::new();
        let mut cursor = offset;

        // labels may not run into the terminator, so the loop stops exactly on
        // it and a pointer can only ever be the last element
        while cursor < labels_end {
            let label = self.next_label(cursor, labels_end)?;
            labels.push(DecodedLabel::Value(ValueLabel {
                offset: cursor,
                text: Some(label.item),
            }));
            cursor = label.next_offset;
        }

        if let Terminator::Pointer(pointer_offset) = terminator {
            let target = read_u16(self.data, pointer_offset)? & POINTER_OFFSET_MASK;
            labels.push(DecodedLabel::Pointer {
                offset: pointer_offset,
                target: target as usize,
            });
        }

        Ok(ParsedDomainName {
            start_offset: offset,
            end_offset: domain_name_end + 1,
            labels,
        })
    }

    // first null byte or pointer byte at or after `offset`
    fn find_text_end_from(&self, offset: usize) -> Result<Terminator, DecodeError> {
        let mut end = offset;

        while end < self.data.len() && self.data[end] != 0 && !is_label_pointer(self.data[end]) {
            end += 1;
        }

        match self.data.get(end) {
            None => Err(DecodeError::UnterminatedName { offset }),
            Some(0) => Ok(Terminator::Null(end)),
            Some(_) if end + 1 < self.data.len() => Ok(Terminator::Pointer(end)),
            Some(_) => Err(DecodeError::MalformedPointer {
                offset: end,
                reason: "pointer is not a 2 byte sequence",
            }),
        }
    }

    fn next_label(&self, offset: usize, limit: usize) -> Result<Parsed<String>, DecodeError> {
        let length = self.data[offset] as usize;
        let start = offset + 1;
        let available = limit - start;

        if length > available {
            return Err(DecodeError::MalformedLength {
                offset,
                declared: length,
                available,
            });
        }

        let text = ascii_at(self.data, start, length)?;
        // names are handed out dot-joined, a dot inside a label would change them
        if let Some(position) = text.find('.') {
            return Err(DecodeError::DotInLabel {
                offset: start + position,
            });
        }

        Ok(Parsed::new(text, start + length))
    }
}

/// Dot-joined text of an expanded label list; `None` for the root name.
pub fn join_labels(labels: &[ValueLabel]) -> Option<String> {
    let texts: Vec<&str> = labels.iter().filter_map(|l| l.text.as_deref()).collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.join("."))
    }
}

fn split_labels(domain: &str) -> Result<Vec<&str>, EncodeError> {
    if !domain.is_ascii() {
        return Err(EncodeError::NonAscii {
            text: domain.to_string(),
        });
    }

    let labels: Vec<&str> = domain.split('.').collect();
    for label in &labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(EncodeError::InvalidLabel {
                name: domain.to_string(),
                label: label.to_string(),
            });
        }
    }

    let length = encoded_len_of(&labels);
    if length > MAX_NAME_LEN {
        return Err(EncodeError::NameTooLong {
            name: domain.to_string(),
            length,
        });
    }

    Ok(labels)
}

fn encoded_len_of(labels: &[&str]) -> usize {
    labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
}

/// Wire length of `name` without compression.
pub fn encoded_len(name: Option<&str>) -> Result<usize, EncodeError> {
    match name {
        None => Ok(1),
        Some(domain) => split_labels(domain).map(|labels| encoded_len_of(&labels)),
    }
}

/// Writes `name` as a null-terminated label sequence; `None` is the root name.
pub fn encode(name: Option<&str>, bytes: &mut BytesMut) -> Result<(), EncodeError> {
    let labels = match name {
        None => Vec::new(),
        Some(domain) => split_labels(domain)?,
    };

    bytes.reserve(encoded_len_of(&labels));
    for label in labels {
        bytes.put_u8(label.len() as u8);
        bytes.put_slice(label.as_bytes());
    }
    bytes.put_u8(0);

    Ok(())
}
