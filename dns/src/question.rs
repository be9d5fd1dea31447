use std::fmt;

use bytes::{BufMut, BytesMut};
use domain_name_query_types::{DnsClass, DnsType, NameQuery};

use crate::error::EncodeError;
use crate::name;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    /// `None` is the root name.
    pub name: Option<String>,
    pub qtype: DnsType,
    pub qclass: DnsClass,
}

impl Question {
    pub fn new(domain: &str, qtype: DnsType, qclass: DnsClass) -> Self {
        Self {
            name: Some(domain.to_string()),
            qtype,
            qclass,
        }
    }

    pub fn encoded_len(&self) -> Result<usize, EncodeError> {
        Ok(name::encoded_len(self.name.as_deref())? + 4)
    }

    pub fn to_bytes(&self, bytes: &mut BytesMut) -> Result<(), EncodeError> {
        name::encode(self.name.as_deref(), bytes)?;
        bytes.put_u16(u16::from(self.qtype));
        bytes.put_u16(u16::from(self.qclass));

        Ok(())
    }
}

impl From<&NameQuery> for Question {
    fn from(query: &NameQuery) -> Self {
        Question::new(&query.name, query.q_type, DnsClass::In)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.name.as_deref().unwrap_or("."),
            self.qclass,
            self.qtype
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bytes_test() {
        let mut bytes = BytesMut::new();

        let q = Question::new("baidu.com", DnsType::A, DnsClass::In);
        q.to_bytes(&mut bytes).unwrap();

        let expected = [5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0, 0, 1, 0, 1];
        assert_eq!(&bytes[..], &expected[..]);
        assert_eq!(q.encoded_len().unwrap(), expected.len());
    }

    #[test]
    fn root_question() {
        let mut bytes = BytesMut::new();

        let q = Question {
            name: None,
            qtype: DnsType::Ns,
            qclass: DnsClass::In,
        };
        q.to_bytes(&mut bytes).unwrap();

        assert_eq!(&bytes[..], &[0, 0, 2, 0, 1][..]);
        assert_eq!(q.to_string(), ".\tIN\tNS");
    }

    #[test]
    fn from_name_query() {
        let q = Question::from(&NameQuery::a_record("z.cn"));
        assert_eq!(q, Question::new("z.cn", DnsType::A, DnsClass::In));
    }
}
