use std::fmt;
use std::net::Ipv4Addr;

use crate::header::Header;
use crate::question::Question;
use crate::resource_record::ResourceRecord;

/// A whole DNS message. The header is kept exactly as given or decoded, so
/// its counts are not guaranteed to match the sections; the encoder checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    name_servers: Vec<ResourceRecord>,
    additional: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<ResourceRecord>,
        name_servers: Vec<ResourceRecord>,
        additional: Vec<ResourceRecord>,
    ) -> Self {
        Self {
            header,
            questions,
            answers,
            name_servers,
            additional,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn name_servers(&self) -> &[ResourceRecord] {
        &self.name_servers
    }

    pub fn additional(&self) -> &[ResourceRecord] {
        &self.additional
    }

    pub fn is_query(&self) -> bool {
        self.header.query
    }

    /// Addresses of the A records in the answer section, in order.
    pub fn addresses(&self) -> Vec<Ipv4Addr> {
        self.answers
            .iter()
            .filter_map(|r| match r {
                ResourceRecord::A(a) => Some(a.address),
                _ => None,
            })
            .collect()
    }

    pub fn first_address(&self) -> Option<Ipv4Addr> {
        self.addresses().first().copied()
    }

    pub fn last_address(&self) -> Option<Ipv4Addr> {
        self.addresses().last().copied()
    }
}

fn write_section(f: &mut fmt::Formatter, title: &str, records: &[ResourceRecord]) -> fmt::Result {
    if records.is_empty() {
        return Ok(());
    }

    writeln!(f, "\n;; {} SECTION:", title)?;
    for r in records {
        writeln!(f, "{}", r)?;
    }
    Ok(())
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, ";; {}", self.header)?;

        if !self.questions.is_empty() {
            writeln!(f, "\n;; QUESTION SECTION:")?;
            for q in &self.questions {
                writeln!(f, ";{}", q)?;
            }
        }

        write_section(f, "ANSWER", &self.answers)?;
        write_section(f, "AUTHORITY", &self.name_servers)?;
        write_section(f, "ADDITIONAL", &self.additional)
    }
}
