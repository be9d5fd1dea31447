// Hand-built wire fragments for tests, independent of the encoder.

use byteorder::{WriteBytesExt, BE};

pub enum Label<'a> {
    Value(&'a str),
    Pointer(u16),
}

/// A pointer-terminated sequence has no null octet.
pub fn encoded_labels(labels: &[Label]) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut has_pointer = false;

    for label in labels {
        match label {
            Label::Value(text) => {
                bytes.push(text.len() as u8);
                bytes.extend_from_slice(text.as_bytes());
            }
            Label::Pointer(target) => {
                bytes.write_u16::<BE>(0xc000 | target).unwrap();
                has_pointer = true;
            }
        }
    }

    if !has_pointer {
        bytes.push(0);
    }

    bytes
}

pub fn header_bytes(id: u16, flags: u16, counts: [u16; 4]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.write_u16::<BE>(id).unwrap();
    bytes.write_u16::<BE>(flags).unwrap();
    for count in counts.iter() {
        bytes.write_u16::<BE>(*count).unwrap();
    }
    bytes
}

/// name + TYPE + CLASS + TTL + RDLENGTH + RDATA
pub fn record_bytes(name: &[u8], rtype: u16, class: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
    let mut bytes = name.to_vec();
    bytes.write_u16::<BE>(rtype).unwrap();
    bytes.write_u16::<BE>(class).unwrap();
    bytes.write_u32::<BE>(ttl).unwrap();
    bytes.write_u16::<BE>(rdata.len() as u16).unwrap();
    bytes.extend_from_slice(rdata);
    bytes
}
