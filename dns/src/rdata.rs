//! Per-type RDATA codecs.
//!
//! Only A, NS, CNAME, HINFO and OPT are understood. Supporting another type
//! takes a [`ResourceRecord`] variant, an [`RDataDecoder`] arm and an arm in
//! [`encode`]; the exhaustive matches point at every place to touch.

use std::convert::TryFrom;
use std::net::Ipv4Addr;

use bytes::{BufMut, Bytes, BytesMut};
use domain_name_query_types::{DnsClass, DnsType};

use crate::character_string;
use crate::error::{DecodeError, EncodeError};
use crate::label_offsets::LabelOffsetTable;
use crate::name::{self, join_labels, DomainNameDecoder};
use crate::resource_record::{
    ARecord, DomainNameRecord, HInfoRecord, OptOption, OptRecord, ResourceRecord,
};
use crate::utils::{read_u16, slice_at, Parsed};

const A_RDATA_LEN: usize = 4;
const MIN_OPT_OPTION_LEN: usize = 4;

/// Everything in a resource record up to and including RDLENGTH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPrefix {
    pub name: Option<String>,
    pub rtype: DnsType,
    /// raw, because OPT does not put a class here
    pub class: u16,
    pub ttl: u32,
    pub rdata_length: u16,
    /// where RDATA starts in the message
    pub rdata_offset: usize,
}

impl RecordPrefix {
    fn rdata_end(&self) -> usize {
        self.rdata_offset + self.rdata_length as usize
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RDataDecoder {
    Address,
    /// RDATA is one domain name; the function wraps it into the record variant.
    DomainName(fn(DomainNameRecord) -> ResourceRecord),
    HostInfo,
    Opt,
}

/// The decoder for `rtype`; `offset` is only used to report unsupported types.
pub fn decoder_for(rtype: DnsType, offset: usize) -> Result<RDataDecoder, DecodeError> {
    match rtype {
        DnsType::A => Ok(RDataDecoder::Address),
        DnsType::Ns => Ok(RDataDecoder::DomainName(ResourceRecord::Ns)),
        DnsType::Cname => Ok(RDataDecoder::DomainName(ResourceRecord::Cname)),
        DnsType::HInfo => Ok(RDataDecoder::HostInfo),
        DnsType::Opt => Ok(RDataDecoder::Opt),
        other => Err(DecodeError::UnsupportedType {
            offset,
            rtype: other,
        }),
    }
}

impl RDataDecoder {
    /// Decodes exactly `prefix.rdata_length` bytes of `data` (the whole message)
    /// at `prefix.rdata_offset`. Names inside RDATA are registered in `labels`.
    pub fn decode(
        &self,
        prefix: RecordPrefix,
        data: &[u8],
        labels: &mut LabelOffsetTable,
    ) -> Result<ResourceRecord, DecodeError> {
        if let RDataDecoder::Address = self {
            // checked before the buffer so a wrong RDLENGTH is reported as such
            if prefix.rdata_length as usize != A_RDATA_LEN {
                return Err(DecodeError::InvalidFixedSizePayload {
                    offset: prefix.rdata_offset,
                    rtype: prefix.rtype,
                    expected: A_RDATA_LEN,
                    actual: prefix.rdata_length as usize,
                });
            }
        }

        check_has_enough_bytes(data, &prefix)?;
        // offsets stay absolute, but nothing can be read past RDATA
        let rdata = &data[..prefix.rdata_end()];

        match self {
            RDataDecoder::Address => decode_address(prefix, rdata),
            RDataDecoder::DomainName(make_record) => {
                decode_domain_name(prefix, rdata, labels).map(*make_record)
            }
            RDataDecoder::HostInfo => decode_host_info(prefix, rdata),
            RDataDecoder::Opt => decode_opt(prefix, rdata),
        }
    }
}

fn check_has_enough_bytes(data: &[u8], prefix: &RecordPrefix) -> Result<(), DecodeError> {
    let available = data.len().saturating_sub(prefix.rdata_offset);

    if prefix.rdata_end() > data.len() {
        return Err(DecodeError::MalformedLength {
            offset: prefix.rdata_offset,
            declared: prefix.rdata_length as usize,
            available,
        });
    }

    Ok(())
}

fn decode_address(prefix: RecordPrefix, rdata: &[u8]) -> Result<ResourceRecord, DecodeError> {
    let bytes = slice_at(rdata, prefix.rdata_offset, A_RDATA_LEN)?;
    // cannot fail, slice_at returned exactly A_RDATA_LEN bytes
    let octets = <[u8; A_RDATA_LEN]>::try_from(bytes).map_err(|_| DecodeError::InvalidAddress {
        offset: prefix.rdata_offset,
    })?;

    Ok(ResourceRecord::A(ARecord {
        name: prefix.name,
        class: DnsClass::from(prefix.class),
        ttl: prefix.ttl,
        address: Ipv4Addr::from(octets),
    }))
}

fn decode_domain_name(
    prefix: RecordPrefix,
    rdata: &[u8],
    labels: &mut LabelOffsetTable,
) -> Result<DomainNameRecord, DecodeError> {
    let domain_name = DomainNameDecoder::new(rdata).decode_starting_at(prefix.rdata_offset)?;
    let value_labels = labels.put(&domain_name)?;

    Ok(DomainNameRecord {
        name: prefix.name,
        class: DnsClass::from(prefix.class),
        ttl: prefix.ttl,
        target: join_labels(&value_labels),
    })
}

fn decode_host_info(prefix: RecordPrefix, rdata: &[u8]) -> Result<ResourceRecord, DecodeError> {
    let cpu = character_string::decode_at(rdata, prefix.rdata_offset)?;
    let os = character_string::decode_at(rdata, cpu.next_offset)?;

    Ok(ResourceRecord::HInfo(HInfoRecord {
        name: prefix.name,
        class: DnsClass::from(prefix.class),
        ttl: prefix.ttl,
        cpu: cpu.item,
        os: os.item,
    }))
}

fn decode_opt(prefix: RecordPrefix, rdata: &[u8]) -> Result<ResourceRecord, DecodeError> {
    let mut options = Vec::new();
    let mut offset = prefix.rdata_offset;

    while offset < rdata.len() {
        let option = parse_option(rdata, offset)?;
        options.push(option.item);
        offset = option.next_offset;
    }

    Ok(ResourceRecord::Opt(OptRecord {
        name: prefix.name,
        udp_payload_size: prefix.class,
        ttl: prefix.ttl,
        options,
    }))
}

// OPTION-CODE (2) | OPTION-LENGTH (2) | OPTION-DATA
fn parse_option(rdata: &[u8], offset: usize) -> Result<Parsed<OptOption>, DecodeError> {
    let available = rdata.len() - offset;
    if available < MIN_OPT_OPTION_LEN {
        return Err(DecodeError::MalformedLength {
            offset,
            declared: MIN_OPT_OPTION_LEN,
            available,
        });
    }

    let code = read_u16(rdata, offset)?;
    let length = read_u16(rdata, offset + 2)?;
    let data_offset = offset + MIN_OPT_OPTION_LEN;

    let available = rdata.len() - data_offset;
    if available < length as usize {
        return Err(DecodeError::MalformedLength {
            offset: offset + 2,
            declared: length as usize,
            available,
        });
    }

    let next_offset = data_offset + length as usize;
    let option = OptOption {
        code,
        length,
        data: Bytes::copy_from_slice(&rdata[data_offset..next_offset]),
    };

    Ok(Parsed::new(option, next_offset))
}

/// Appends the RDATA of `record` (without RDLENGTH) to `bytes`.
pub fn encode(record: &ResourceRecord, bytes: &mut BytesMut) -> Result<(), EncodeError> {
    match record {
        ResourceRecord::A(r) => {
            bytes.put_slice(&r.address.octets());
            Ok(())
        }
        ResourceRecord::Ns(r) | ResourceRecord::Cname(r) => {
            name::encode(r.target.as_deref(), bytes)
        }
        ResourceRecord::HInfo(r) => {
            character_string::encode(&r.cpu, bytes)?;
            character_string::encode(&r.os, bytes)
        }
        ResourceRecord::Opt(r) => encode_options(&r.options, bytes),
    }
}

fn encode_options(options: &[OptOption], bytes: &mut BytesMut) -> Result<(), EncodeError> {
    for option in options {
        if option.length as usize != option.data.len() {
            return Err(EncodeError::OptionLengthMismatch {
                code: option.code,
                declared: option.length,
                actual: option.data.len(),
            });
        }
    }

    let total: usize = options.iter().map(|o| MIN_OPT_OPTION_LEN + o.data.len()).sum();
    bytes.reserve(total);
    for option in options {
        bytes.put_u16(option.code);
        bytes.put_u16(option.length);
        bytes.put_slice(&option.data);
    }

    Ok(())
}
