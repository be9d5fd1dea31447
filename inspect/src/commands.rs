use std::error::Error;
use std::fs;
use std::path::Path;

use configuration::{IdStrategy, InputFormat};
use dns::{IdSource, Message, RandomIds, SequentialIds};
use domain_name_query_types::{DnsType, NameQuery};
use log::{debug, info};

#[derive(Debug, thiserror::Error)]
#[error("message is {size} bytes, limit is {max}")]
pub struct TooLarge {
    pub size: usize,
    pub max: usize,
}

/// Turns file content into message bytes. Whitespace in hex input is ignored.
pub fn parse_input(
    raw: &[u8],
    format: InputFormat,
    max_message_size: usize,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let bytes = match format {
        InputFormat::Binary => raw.to_vec(),
        InputFormat::Hex => {
            let digits: Vec<u8> = raw
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            hex::decode(digits)?
        }
    };

    if bytes.len() > max_message_size {
        return Err(Box::new(TooLarge {
            size: bytes.len(),
            max: max_message_size,
        }));
    }

    Ok(bytes)
}

pub fn decode_file(
    path: &Path,
    format: InputFormat,
    max_message_size: usize,
) -> Result<Message, Box<dyn Error>> {
    let raw = fs::read(path)?;
    let bytes = parse_input(&raw, format, max_message_size)?;
    debug!("decoding {} bytes from {}", bytes.len(), path.display());

    let message = dns::decode(&bytes)?;
    Ok(message)
}

pub fn build_query(domain: &str, qtype: &str, ids: IdStrategy) -> Result<Vec<u8>, Box<dyn Error>> {
    let q_type: DnsType = qtype.parse()?;
    let query = NameQuery::new(domain, q_type);

    let mut id_source: Box<dyn IdSource> = match ids {
        IdStrategy::Random => Box::new(RandomIds),
        IdStrategy::Sequential => Box::new(SequentialIds::default()),
    };
    let bytes = dns::encode_query(id_source.as_mut(), &query)?;
    info!("built {} query for {}, {} bytes", q_type, domain, bytes.len());

    Ok(bytes.to_vec())
}
