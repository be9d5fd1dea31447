//! DNS message codec: RFC 1035 messages with name compression on the decode
//! side and EDNS0 OPT records.

mod builder;
pub mod character_string;
mod decoder;
mod encoder;
mod error;
mod header;
pub mod label_offsets;
mod message;
pub mod name;
mod question;
pub mod rdata;
mod resource_record;
pub mod utils;

#[cfg(test)]
mod test_support;

use bytes::Bytes;
use domain_name_query_types::NameQuery;

pub use builder::{IdSource, MessageBuilder, RandomIds, SequentialIds};
pub use decoder::MessageDecoder;
pub use encoder::encode_into;
pub use error::{DecodeError, EncodeError};
pub use header::{Header, Opcode, ResponseCode, HEADER_LEN};
pub use message::Message;
pub use question::Question;
pub use resource_record::{
    ARecord, DomainNameRecord, HInfoRecord, OptOption, OptRecord, ResourceRecord,
};

pub fn decode(bytes: &[u8]) -> Result<Message, DecodeError> {
    MessageDecoder::new(bytes).decode()
}

pub fn encode(message: &Message) -> Result<Bytes, EncodeError> {
    encoder::encode(message)
}

/// Encodes a recursion-desired query for `query`.
pub fn encode_query<I: IdSource + ?Sized>(
    ids: &mut I,
    query: &NameQuery,
) -> Result<Bytes, EncodeError> {
    encode(&Message::query(ids, query))
}
