use domain_name_query_types::DnsType;
use thiserror::Error;

/// Failures while decoding a message. Every variant carries the byte offset
/// (from the start of the message) at which the problem was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("malformed length at offset {offset}: declared {declared}, {available} available")]
    MalformedLength {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("malformed pointer at offset {offset}: {reason}")]
    MalformedPointer { offset: usize, reason: &'static str },

    #[error("pointer at offset {offset} references unknown labels at offset {target}")]
    UnknownPointerTarget { offset: usize, target: usize },

    #[error("pointer at offset {offset} in question section")]
    PointerInQuestion { offset: usize },

    #[error("domain name at offset {offset} is not terminated by a null byte or a pointer")]
    UnterminatedName { offset: usize },

    #[error("unsupported record type {rtype} at offset {offset}")]
    UnsupportedType { offset: usize, rtype: DnsType },

    #[error("{rtype} rdata at offset {offset} must be {expected} bytes, got {actual}")]
    InvalidFixedSizePayload {
        offset: usize,
        rtype: DnsType,
        expected: usize,
        actual: usize,
    },

    /// RDATA of an address record that does not form an address. The A
    /// length check runs first, so 4-byte RDATA never produces it.
    #[error("invalid address at offset {offset}")]
    InvalidAddress { offset: usize },

    #[error("non-ASCII byte at offset {offset}")]
    NonAsciiText { offset: usize },

    #[error("'.' inside label text at offset {offset}")]
    DotInLabel { offset: usize },
}

impl DecodeError {
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::Truncated { offset, .. }
            | DecodeError::MalformedLength { offset, .. }
            | DecodeError::MalformedPointer { offset, .. }
            | DecodeError::UnknownPointerTarget { offset, .. }
            | DecodeError::PointerInQuestion { offset }
            | DecodeError::UnterminatedName { offset }
            | DecodeError::UnsupportedType { offset, .. }
            | DecodeError::InvalidFixedSizePayload { offset, .. }
            | DecodeError::InvalidAddress { offset }
            | DecodeError::NonAsciiText { offset }
            | DecodeError::DotInLabel { offset } => offset,
        }
    }

    /// Structural damage to the byte stream, as opposed to well-formed bytes
    /// this codec does not understand.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            DecodeError::Truncated { .. }
                | DecodeError::MalformedLength { .. }
                | DecodeError::MalformedPointer { .. }
                | DecodeError::UnknownPointerTarget { .. }
                | DecodeError::PointerInQuestion { .. }
                | DecodeError::UnterminatedName { .. }
                | DecodeError::NonAsciiText { .. }
                | DecodeError::DotInLabel { .. }
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("header declares {declared} {section} entries but {actual} were supplied")]
    CountMismatch {
        section: &'static str,
        declared: u16,
        actual: usize,
    },

    #[error("invalid label {label:?} in name {name:?}")]
    InvalidLabel { name: String, label: String },

    #[error("name {name:?} is {length} bytes in wire format, maximum is 255")]
    NameTooLong { name: String, length: usize },

    #[error("character string is {length} bytes, maximum is 255")]
    CharacterStringTooLong { length: usize },

    #[error("rdata is {length} bytes, maximum is 65535")]
    RDataTooLong { length: usize },

    #[error("OPT option {code} declares {declared} bytes but carries {actual}")]
    OptionLengthMismatch {
        code: u16,
        declared: u16,
        actual: usize,
    },

    #[error("non-ASCII text {text:?}")]
    NonAscii { text: String },
}
