use domain_name_query_types::NameQuery;

use crate::header::Header;
use crate::message::Message;
use crate::question::Question;
use crate::resource_record::ResourceRecord;

/// Where message ids come from.
pub trait IdSource {
    fn next_id(&mut self) -> u16;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> u16 {
        fastrand::u16(..)
    }
}

/// Hands out `start`, `start + 1`, ... wrapping at `u16::MAX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialIds {
    next: u16,
}

impl SequentialIds {
    pub fn starting_at(start: u16) -> Self {
        Self { next: start }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> u16 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Assembles a [`Message`] whose header counts always match its sections.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    name_servers: Vec<ResourceRecord>,
    additional: Vec<ResourceRecord>,
}

impl MessageBuilder {
    /// A query with an id drawn from `ids` and no flags set.
    pub fn new<I: IdSource + ?Sized>(ids: &mut I) -> Self {
        let header = Header {
            id: ids.next_id(),
            query: true,
            ..Header::default()
        };

        Self {
            header,
            ..Self::default()
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.header.id = id;
        self
    }

    pub fn response(mut self) -> Self {
        self.header.query = false;
        self
    }

    /// Only the low 4 bits are kept.
    pub fn opcode(mut self, opcode: u8) -> Self {
        self.header.opcode = opcode & 0xf;
        self
    }

    pub fn authoritative_answer(mut self, value: bool) -> Self {
        self.header.authoritative_answer = value;
        self
    }

    pub fn truncation(mut self, value: bool) -> Self {
        self.header.truncation = value;
        self
    }

    pub fn recursion_desired(mut self, value: bool) -> Self {
        self.header.recursion_desired = value;
        self
    }

    pub fn recursion_available(mut self, value: bool) -> Self {
        self.header.recursion_available = value;
        self
    }

    /// Only the low 4 bits are kept.
    pub fn response_code(mut self, code: u8) -> Self {
        self.header.response_code = code & 0xf;
        self
    }

    pub fn question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.answers.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.name_servers.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.additional.push(record);
        self
    }

    // Sections longer than u16::MAX saturate the count; the encoder then
    // reports the mismatch.
    pub fn build(self) -> Message {
        let mut header = self.header;
        header.question_count = count(&self.questions);
        header.answer_count = count(&self.answers);
        header.name_server_count = count(&self.name_servers);
        header.additional_count = count(&self.additional);

        Message::new(
            header,
            self.questions,
            self.answers,
            self.name_servers,
            self.additional,
        )
    }
}

fn count<T>(section: &[T]) -> u16 {
    section.len().min(u16::MAX as usize) as u16
}

impl Message {
    /// A recursion-desired query for `query` in class IN.
    pub fn query<I: IdSource + ?Sized>(ids: &mut I, query: &NameQuery) -> Message {
        MessageBuilder::new(ids)
            .recursion_desired(true)
            .question(Question::from(query))
            .build()
    }
}
