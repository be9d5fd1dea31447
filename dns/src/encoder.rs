use std::convert::TryFrom;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::EncodeError;
use crate::header::HEADER_LEN;
use crate::message::Message;
use crate::name;
use crate::question::Question;
use crate::rdata;
use crate::resource_record::{ResourceRecord, RECORD_FIXED_LEN};

pub fn encode(message: &Message) -> Result<Bytes, EncodeError> {
    let mut bytes = BytesMut::new();
    encode_into(message, &mut bytes)?;

    Ok(bytes.freeze())
}

/// Appends the wire form of `message` to `bytes` and returns its length.
/// Nothing is appended when encoding fails.
pub fn encode_into(message: &Message, bytes: &mut BytesMut) -> Result<usize, EncodeError> {
    check_counts(message)?;

    let questions = message
        .questions()
        .iter()
        .map(encode_question)
        .collect::<Result<Vec<_>, _>>()?;
    let records = message
        .answers()
        .iter()
        .chain(message.name_servers())
        .chain(message.additional())
        .map(encode_resource_record)
        .collect::<Result<Vec<_>, _>>()?;

    let total = HEADER_LEN
        + questions.iter().map(Bytes::len).sum::<usize>()
        + records.iter().map(Bytes::len).sum::<usize>();

    bytes.reserve(total);
    bytes.put_slice(&message.header().to_bytes());
    for part in questions.iter().chain(records.iter()) {
        bytes.put_slice(part);
    }

    Ok(total)
}

fn check_counts(message: &Message) -> Result<(), EncodeError> {
    let header = message.header();
    let sections = [
        ("question", header.question_count, message.questions().len()),
        ("answer", header.answer_count, message.answers().len()),
        ("authority", header.name_server_count, message.name_servers().len()),
        ("additional", header.additional_count, message.additional().len()),
    ];

    for (section, declared, actual) in sections.iter() {
        if *declared as usize != *actual {
            return Err(EncodeError::CountMismatch {
                section: *section,
                declared: *declared,
                actual: *actual,
            });
        }
    }

    Ok(())
}

fn encode_question(question: &Question) -> Result<Bytes, EncodeError> {
    let mut bytes = BytesMut::with_capacity(question.encoded_len()?);
    question.to_bytes(&mut bytes)?;

    Ok(bytes.freeze())
}

// name, TYPE, CLASS, TTL, RDLENGTH, RDATA; names are never compressed
fn encode_resource_record(record: &ResourceRecord) -> Result<Bytes, EncodeError> {
    let mut rdata = BytesMut::new();
    rdata::encode(record, &mut rdata)?;
    let rdata_length =
        u16::try_from(rdata.len()).map_err(|_| EncodeError::RDataTooLong { length: rdata.len() })?;

    let name_length = name::encoded_len(record.name())?;
    let mut bytes = BytesMut::with_capacity(name_length + RECORD_FIXED_LEN + rdata.len());

    name::encode(record.name(), &mut bytes)?;
    bytes.put_u16(u16::from(record.rtype()));
    bytes.put_u16(record.numeric_class());
    bytes.put_u32(record.ttl());
    bytes.put_u16(rdata_length);
    bytes.put_slice(&rdata);

    Ok(bytes.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use crate::resource_record::{ARecord, HInfoRecord, OptOption, OptRecord};
    use crate::test_support::{encoded_labels, header_bytes, record_bytes, Label};
    use domain_name_query_types::{DnsClass, DnsType};
    use std::net::Ipv4Addr;

    fn header(counts: [u16; 4]) -> Header {
        Header {
            id: 0xd1b7,
            query: true,
            recursion_desired: true,
            question_count: counts[0],
            answer_count: counts[1],
            name_server_count: counts[2],
            additional_count: counts[3],
            ..Header::default()
        }
    }

    #[test]
    fn encodes_request() {
        let msg = Message::new(
            header([1, 0, 0, 0]),
            vec![Question::new("baidu.com", DnsType::A, DnsClass::In)],
            vec![],
            vec![],
            vec![],
        );

        let bytes = encode(&msg).unwrap();

        let expected = [
            209, 183, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, // header
            5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0, 0, 1, 0, 1, // question
        ];
        assert_eq!(&bytes[..], &expected[..]);
    }

    #[test]
    fn encodes_records_in_section_order() {
        let a = ResourceRecord::A(ARecord {
            name: Some("a".to_string()),
            class: DnsClass::In,
            ttl: 7,
            address: Ipv4Addr::new(1, 2, 3, 4),
        });
        let hinfo = ResourceRecord::HInfo(HInfoRecord {
            name: Some("h".to_string()),
            class: DnsClass::Ch,
            ttl: 8,
            cpu: "c".to_string(),
            os: "o".to_string(),
        });
        let opt = ResourceRecord::Opt(OptRecord {
            name: None,
            udp_payload_size: 4096,
            ttl: 0x0000_8000,
            options: vec![OptOption::new(12, &[0, 0])],
        });
        let msg = Message::new(header([0, 1, 1, 1]), vec![], vec![a], vec![hinfo], vec![opt]);

        let bytes = encode(&msg).unwrap();

        let mut expected = header_bytes(0xd1b7, 0x0100, [0, 1, 1, 1]);
        let a_owner = encoded_labels(&[Label::Value("a")]);
        let hinfo_owner = encoded_labels(&[Label::Value("h")]);
        expected.extend(record_bytes(&a_owner, 1, 1, 7, &[1, 2, 3, 4]));
        expected.extend(record_bytes(&hinfo_owner, 13, 3, 8, b"\x01c\x01o"));
        expected.extend(record_bytes(&[0], 41, 4096, 0x8000, &[0, 12, 0, 2, 0, 0]));
        assert_eq!(&bytes[..], &expected[..]);
    }

    #[test]
    fn counts_must_match_sections() {
        let msg = Message::new(header([2, 0, 0, 0]), vec![], vec![], vec![], vec![]);

        assert_eq!(
            encode(&msg),
            Err(EncodeError::CountMismatch {
                section: "question",
                declared: 2,
                actual: 0
            })
        );
    }

    #[test]
    fn encode_into_appends() {
        let msg = Message::new(header([0, 0, 0, 0]), vec![], vec![], vec![], vec![]);
        let mut scratch = BytesMut::from(&b"xy"[..]);

        let written = encode_into(&msg, &mut scratch).unwrap();

        assert_eq!(written, HEADER_LEN);
        assert_eq!(scratch.len(), 2 + HEADER_LEN);
        assert_eq!(&scratch[..2], b"xy");
    }

    #[test]
    fn failed_encode_leaves_buffer_alone() {
        let msg = Message::new(
            header([1, 0, 0, 0]),
            vec![Question::new("bad..name", DnsType::A, DnsClass::In)],
            vec![],
            vec![],
            vec![],
        );
        let mut scratch = BytesMut::new();

        assert!(matches!(
            encode_into(&msg, &mut scratch),
            Err(EncodeError::InvalidLabel { .. })
        ));
        assert!(scratch.is_empty());
    }

    #[test]
    fn oversized_rdata_fails() {
        let opt = ResourceRecord::Opt(OptRecord {
            name: None,
            udp_payload_size: 512,
            ttl: 0,
            options: vec![OptOption::new(1, &[0; 65_000]), OptOption::new(2, &[0; 1_000])],
        });
        let msg = Message::new(header([0, 0, 0, 1]), vec![], vec![], vec![], vec![opt]);

        assert_eq!(encode(&msg), Err(EncodeError::RDataTooLong { length: 66_008 }));
    }
}
