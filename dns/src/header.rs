use std::fmt;

use crate::error::DecodeError;
use crate::utils::{is_bit_set, read_u16, slice_at, write_u16};

pub const HEADER_LEN: usize = 12;

/// OPCODE values, RFC 1035 section 4.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Query,
    IQuery,
    Status,
    Reserved(u8),
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        match value {
            0 => Opcode::Query,
            1 => Opcode::IQuery,
            2 => Opcode::Status,
            other => Opcode::Reserved(other),
        }
    }
}

/// RCODE values, RFC 1035 section 4.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(u8),
}

impl From<u8> for ResponseCode {
    fn from(value: u8) -> Self {
        match value {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            other => ResponseCode::Reserved(other),
        }
    }
}

// 12 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Header {
    pub id: u16,
    /// true for a query, false for a response (the QR bit is inverted)
    pub query: bool,
    /// 4 bits
    pub opcode: u8,
    pub authoritative_answer: bool,
    pub truncation: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    /// always decoded as false and never written
    pub reserved: bool,
    /// 4 bits
    pub response_code: u8,
    pub question_count: u16,
    pub answer_count: u16,
    pub name_server_count: u16,
    pub additional_count: u16,
}

impl Header {
    pub fn parse_from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let bytes = slice_at(data, 0, HEADER_LEN)?;
        let flags = bytes[2];
        let codes = bytes[3];

        let h = Self {
            id: read_u16(bytes, 0)?,
            query: !is_bit_set(flags, 7),
            opcode: (flags >> 3) & 0xf,
            authoritative_answer: is_bit_set(flags, 2),
            truncation: is_bit_set(flags, 1),
            recursion_desired: is_bit_set(flags, 0),
            recursion_available: is_bit_set(codes, 7),
            reserved: false,
            response_code: codes & 0xf,
            question_count: read_u16(bytes, 4)?,
            answer_count: read_u16(bytes, 6)?,
            name_server_count: read_u16(bytes, 8)?,
            additional_count: read_u16(bytes, 10)?,
        };

        Ok(h)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        write_u16(&mut bytes, 0, self.id);

        if !self.query {
            bytes[2] = 1 << 7;
        }
        bytes[2] |= (self.opcode & 0xf) << 3;
        if self.authoritative_answer {
            bytes[2] |= 1 << 2;
        }
        if self.truncation {
            bytes[2] |= 1 << 1;
        }
        if self.recursion_desired {
            bytes[2] |= 1;
        }

        if self.recursion_available {
            bytes[3] = 1 << 7;
        }
        bytes[3] |= self.response_code & 0xf;

        write_u16(&mut bytes, 4, self.question_count);
        write_u16(&mut bytes, 6, self.answer_count);
        write_u16(&mut bytes, 8, self.name_server_count);
        write_u16(&mut bytes, 10, self.additional_count);

        bytes
    }

    pub fn opcode_kind(&self) -> Opcode {
        Opcode::from(self.opcode)
    }

    pub fn rcode(&self) -> ResponseCode {
        ResponseCode::from(self.response_code)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id: {}, {}, opcode: {:?}, rcode: {:?}, flags:",
            self.id,
            if self.query { "query" } else { "response" },
            self.opcode_kind(),
            self.rcode()
        )?;
        let flags = [
            (self.authoritative_answer, " aa"),
            (self.truncation, " tc"),
            (self.recursion_desired, " rd"),
            (self.recursion_available, " ra"),
        ];
        for (set, name) in flags.iter() {
            if *set {
                f.write_str(name)?;
            }
        }
        write!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.question_count, self.answer_count, self.name_server_count, self.additional_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::header_bytes;

    #[test]
    fn parses_query_header() {
        // baidu.com request: rd = 1
        let bytes = [209, 183, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0];

        let h = Header::parse_from_bytes(&bytes).unwrap();

        assert_eq!(h.id, 209 * 256 + 183);
        assert!(h.query);
        assert_eq!(h.opcode_kind(), Opcode::Query);
        assert!(h.recursion_desired);
        assert!(!h.recursion_available);
        assert_eq!(h.question_count, 1);
        assert_eq!(h.to_bytes(), bytes);
    }

    #[test]
    fn parses_response_header() {
        // QR, opcode 2, AA, TC / RA, rcode 3, reserved bits set
        let bytes = header_bytes(7, 0b1001_0110_1111_0011, [1, 2, 3, 4]);

        let h = Header::parse_from_bytes(&bytes).unwrap();

        assert!(!h.query);
        assert_eq!(h.opcode_kind(), Opcode::Status);
        assert!(h.authoritative_answer);
        assert!(h.truncation);
        assert!(!h.recursion_desired);
        assert!(h.recursion_available);
        assert!(!h.reserved);
        assert_eq!(h.rcode(), ResponseCode::NameError);
        assert_eq!(
            (h.question_count, h.answer_count, h.name_server_count, h.additional_count),
            (1, 2, 3, 4)
        );
    }

    #[test]
    fn short_header_is_truncated() {
        assert_eq!(
            Header::parse_from_bytes(&[0; 11]),
            Err(DecodeError::Truncated {
                offset: 0,
                needed: HEADER_LEN,
                available: 11
            })
        );
    }

    #[test]
    fn every_flag_combination_survives() {
        // query, 4 opcode bits, aa, tc, rd, ra and 4 rcode bits
        for bits in 0u16..(1 << 13) {
            let h = Header {
                id: bits,
                query: bits & 1 != 0,
                opcode: ((bits >> 1) & 0xf) as u8,
                authoritative_answer: bits & (1 << 5) != 0,
                truncation: bits & (1 << 6) != 0,
                recursion_desired: bits & (1 << 7) != 0,
                recursion_available: bits & (1 << 8) != 0,
                reserved: false,
                response_code: ((bits >> 9) & 0xf) as u8,
                ..Header::default()
            };

            let decoded = Header::parse_from_bytes(&h.to_bytes()).unwrap();

            assert_eq!(decoded, h);
        }
    }

    #[test]
    fn reserved_bit_is_not_written() {
        let h = Header {
            reserved: true,
            query: true,
            ..Header::default()
        };

        let decoded = Header::parse_from_bytes(&h.to_bytes()).unwrap();

        assert!(!decoded.reserved);
        assert_eq!(h.to_bytes()[3], 0);
    }
}
