use crate::error::DecodeError;
use crate::header::{Header, HEADER_LEN};
use crate::label_offsets::LabelOffsetTable;
use crate::message::Message;
use crate::name::{join_labels, DecodedLabel, DomainNameDecoder};
use crate::question::Question;
use crate::rdata::{self, RecordPrefix};
use crate::resource_record::{ResourceRecord, RECORD_FIXED_LEN};
use crate::utils::{read_u16, read_u32, slice_at};

// root name + QTYPE + QCLASS
const MIN_QUESTION_LEN: usize = 5;
// root name + fixed fields
const MIN_RECORD_LEN: usize = 1 + RECORD_FIXED_LEN;

/// Decodes one message with a single forward cursor. Compression pointers are
/// resolved through the label table built up along the way, so the cursor is
/// never moved backwards.
pub struct MessageDecoder<'a> {
    data: &'a [u8],
    offset: usize,
    labels: LabelOffsetTable,
}

impl<'a> MessageDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            labels: LabelOffsetTable::new(),
        }
    }

    pub fn decode(mut self) -> Result<Message, DecodeError> {
        let header = Header::parse_from_bytes(self.data)?;
        self.offset = HEADER_LEN;

        let capacity = self.capacity_for(header.question_count, MIN_QUESTION_LEN);
        let mut questions = Vec::with_capacity(capacity);
        for _ in 0..header.question_count {
            questions.push(self.parse_question()?);
        }

        let answers = self.parse_resource_records(header.answer_count)?;
        let name_servers = self.parse_resource_records(header.name_server_count)?;
        let additional = self.parse_resource_records(header.additional_count)?;

        Ok(Message::new(
            header,
            questions,
            answers,
            name_servers,
            additional,
        ))
    }

    // counts come from the wire; don't let them size allocations beyond what
    // the remaining bytes could hold
    fn capacity_for(&self, count: u16, min_len: usize) -> usize {
        let remaining = self.data.len().saturating_sub(self.offset);
        (count as usize).min(remaining / min_len)
    }

    fn parse_question(&mut self) -> Result<Question, DecodeError> {
        let domain_name = DomainNameDecoder::new(self.data).decode_starting_at(self.offset)?;

        let mut value_labels = Vec::with_capacity(domain_name.labels.len());
        for label in domain_name.labels {
            match label {
                DecodedLabel::Value(value) => value_labels.push(value),
                DecodedLabel::Pointer { offset, .. } => {
                    return Err(DecodeError::PointerInQuestion { offset })
                }
            }
        }

        let name = join_labels(&value_labels);
        self.labels.put_labels(domain_name.start_offset, value_labels);
        self.offset = domain_name.end_offset;

        let fixed = slice_at(self.data, self.offset, 4)?;
        let qtype = read_u16(fixed, 0)?;
        let qclass = read_u16(fixed, 2)?;
        self.offset += 4;

        Ok(Question {
            name,
            qtype: qtype.into(),
            qclass: qclass.into(),
        })
    }

    fn parse_resource_records(&mut self, count: u16) -> Result<Vec<ResourceRecord>, DecodeError> {
        let mut records = Vec::with_capacity(self.capacity_for(count, MIN_RECORD_LEN));

        for _ in 0..count {
            let record = self.parse_resource_record()?;
            records.push(record);
        }

        Ok(records)
    }

    fn parse_resource_record(&mut self) -> Result<ResourceRecord, DecodeError> {
        let domain_name = DomainNameDecoder::new(self.data).decode_starting_at(self.offset)?;
        let value_labels = self.labels.put(&domain_name)?;

        let fixed_offset = domain_name.end_offset;
        let fixed = slice_at(self.data, fixed_offset, RECORD_FIXED_LEN)?;
        let rtype = read_u16(fixed, 0)?.into();
        let class = read_u16(fixed, 2)?;
        let ttl = read_u32(fixed, 4)?;
        let rdata_length = read_u16(fixed, 8)?;

        let prefix = RecordPrefix {
            name: join_labels(&value_labels),
            rtype,
            class,
            ttl,
            rdata_length,
            rdata_offset: fixed_offset + RECORD_FIXED_LEN,
        };
        let next_offset = prefix.rdata_offset + rdata_length as usize;

        let decoder = rdata::decoder_for(rtype, fixed_offset)?;
        let record = decoder.decode(prefix, self.data, &mut self.labels)?;
        self.offset = next_offset;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_record::{ARecord, DomainNameRecord, OptOption, OptRecord};
    use crate::test_support::{encoded_labels, header_bytes, record_bytes, Label};
    use byteorder::{WriteBytesExt, BE};
    use domain_name_query_types::{DnsClass, DnsType};
    use std::net::Ipv4Addr;

    fn decode(data: &[u8]) -> Result<Message, DecodeError> {
        MessageDecoder::new(data).decode()
    }

    fn question_bytes(labels: &[Label], qtype: u16, qclass: u16) -> Vec<u8> {
        let mut bytes = encoded_labels(labels);
        bytes.write_u16::<BE>(qtype).unwrap();
        bytes.write_u16::<BE>(qclass).unwrap();
        bytes
    }

    // a captured response to "www.google.com A", every owner name compressed
    fn compressed_response() -> Vec<u8> {
        let mut data = header_bytes(0xd1b7, 0x8180, [1, 2, 1, 1]);
        // 12: question
        data.extend(question_bytes(
            &[Label::Value("www"), Label::Value("google"), Label::Value("com")],
            1,
            1,
        ));
        // 32: www.google.com CNAME ghs.google.com
        let cname_rdata = encoded_labels(&[Label::Value("ghs"), Label::Pointer(16)]);
        data.extend(record_bytes(&encoded_labels(&[Label::Pointer(12)]), 5, 1, 300, &cname_rdata));
        // 50: ghs.google.com A 142.250.74.36
        let a_owner = encoded_labels(&[Label::Pointer(44)]);
        data.extend(record_bytes(&a_owner, 1, 1, 60, &[142, 250, 74, 36]));
        // 66: google.com NS ns1.google.com
        let ns_rdata = encoded_labels(&[Label::Value("ns1"), Label::Pointer(16)]);
        data.extend(record_bytes(&encoded_labels(&[Label::Pointer(16)]), 2, 1, 3600, &ns_rdata));
        // 84: OPT
        data.extend(record_bytes(&[0], 41, 1232, 0, &[0, 10, 0, 2, 0xab, 0xcd]));
        data
    }

    #[test]
    fn decodes_compressed_response() {
        let msg = decode(&compressed_response()).unwrap();

        assert!(!msg.is_query());
        assert!(msg.header().recursion_desired);
        assert!(msg.header().recursion_available);
        assert_eq!(
            msg.questions(),
            &[Question::new("www.google.com", DnsType::A, DnsClass::In)]
        );
        assert_eq!(
            msg.answers(),
            &[
                ResourceRecord::Cname(DomainNameRecord {
                    name: Some("www.google.com".to_string()),
                    class: DnsClass::In,
                    ttl: 300,
                    target: Some("ghs.google.com".to_string()),
                }),
                ResourceRecord::A(ARecord {
                    name: Some("ghs.google.com".to_string()),
                    class: DnsClass::In,
                    ttl: 60,
                    address: Ipv4Addr::new(142, 250, 74, 36),
                }),
            ]
        );
        assert_eq!(
            msg.name_servers(),
            &[ResourceRecord::Ns(DomainNameRecord {
                name: Some("google.com".to_string()),
                class: DnsClass::In,
                ttl: 3600,
                target: Some("ns1.google.com".to_string()),
            })]
        );
        assert_eq!(
            msg.additional(),
            &[ResourceRecord::Opt(OptRecord {
                name: None,
                udp_payload_size: 1232,
                ttl: 0,
                options: vec![OptOption::new(10, &[0xab, 0xcd])],
            })]
        );
        assert_eq!(msg.last_address(), Some(Ipv4Addr::new(142, 250, 74, 36)));
    }

    #[test]
    fn header_only() {
        let data = header_bytes(5, 0x0100, [0, 0, 0, 0]);

        let msg = decode(&data).unwrap();

        assert_eq!(msg.header().id, 5);
        assert!(msg.questions().is_empty());
        assert!(msg.answers().is_empty());
    }

    #[test]
    fn short_header_fails() {
        assert!(matches!(
            decode(&[0, 1, 1, 0, 0]),
            Err(DecodeError::Truncated { offset: 0, needed: 12, available: 5 })
        ));
    }

    #[test]
    fn pointer_in_question_fails() {
        let mut data = header_bytes(1, 0x0100, [2, 0, 0, 0]);
        data.extend(question_bytes(&[Label::Value("google"), Label::Value("com")], 1, 1));
        data.extend(question_bytes(&[Label::Value("www"), Label::Pointer(12)], 1, 1));

        let err = decode(&data).unwrap_err();

        assert_eq!(err, DecodeError::PointerInQuestion { offset: 32 });
        assert!(err.is_malformed_input());
    }

    #[test]
    fn question_without_type_and_class_fails() {
        let mut data = header_bytes(1, 0x0100, [1, 0, 0, 0]);
        data.extend(encoded_labels(&[Label::Value("google"), Label::Value("com")]));
        data.extend(&[0, 1, 0]);

        assert!(matches!(
            decode(&data),
            Err(DecodeError::Truncated { offset: 24, needed: 4, available: 3 })
        ));
    }

    #[test]
    fn unknown_question_type_is_kept() {
        let mut data = header_bytes(1, 0x0100, [1, 0, 0, 0]);
        data.extend(question_bytes(&[Label::Value("example")], 65, 1));

        let msg = decode(&data).unwrap();

        assert_eq!(msg.questions()[0].qtype, DnsType::Unknown(65));
    }

    #[test]
    fn counts_beyond_data_fail() {
        let mut data = header_bytes(1, 0x8180, [0, 3, 0, 0]);
        data.extend(record_bytes(&encoded_labels(&[Label::Value("a")]), 1, 1, 1, &[1, 2, 3, 4]));

        let err = decode(&data).unwrap_err();

        assert_eq!(err, DecodeError::UnterminatedName { offset: data.len() });
    }

    #[test]
    fn record_without_fixed_fields_fails() {
        let mut data = header_bytes(1, 0x8180, [0, 1, 0, 0]);
        data.extend(encoded_labels(&[Label::Value("a")]));
        data.extend(&[0, 1, 0, 1, 0]);

        assert!(matches!(
            decode(&data),
            Err(DecodeError::Truncated { offset: 15, needed: 10, available: 5 })
        ));
    }

    #[test]
    fn unsupported_record_type_fails() {
        let mut data = header_bytes(1, 0x8180, [0, 1, 0, 0]);
        data.extend(record_bytes(&encoded_labels(&[Label::Value("a")]), 15, 1, 1, &[0, 10, 0]));

        assert_eq!(
            decode(&data),
            Err(DecodeError::UnsupportedType {
                offset: 15,
                rtype: DnsType::Mx
            })
        );
    }

    #[test]
    fn a_record_with_wrong_length_fails() {
        let mut data = header_bytes(1, 0x8180, [0, 1, 0, 0]);
        data.extend(record_bytes(&encoded_labels(&[Label::Value("a")]), 1, 1, 1, &[1, 2, 3, 4, 5]));

        assert!(matches!(
            decode(&data),
            Err(DecodeError::InvalidFixedSizePayload { offset: 25, actual: 5, .. })
        ));
    }

    #[test]
    fn pointer_to_unseen_offset_fails() {
        let mut data = header_bytes(1, 0x8180, [0, 1, 0, 0]);
        data.extend(record_bytes(&encoded_labels(&[Label::Pointer(4)]), 1, 1, 1, &[1, 2, 3, 4]));

        assert_eq!(
            decode(&data),
            Err(DecodeError::UnknownPointerTarget { offset: 12, target: 4 })
        );
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = header_bytes(1, 0x0100, [1, 0, 0, 0]);
        data.extend(question_bytes(&[Label::Value("a")], 1, 1));
        data.extend(&[0xde, 0xad]);

        assert_eq!(decode(&data).unwrap().questions().len(), 1);
    }
}
