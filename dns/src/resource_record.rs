use std::fmt;
use std::net::Ipv4Addr;

use bytes::Bytes;
use domain_name_query_types::{DnsClass, DnsType};

// TYPE, CLASS, TTL, RDLENGTH
pub const RECORD_FIXED_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ARecord {
    pub name: Option<String>,
    pub class: DnsClass,
    pub ttl: u32,
    pub address: Ipv4Addr,
}

/// RDATA consisting of a single domain name (NS, CNAME).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainNameRecord {
    pub name: Option<String>,
    pub class: DnsClass,
    pub ttl: u32,
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HInfoRecord {
    pub name: Option<String>,
    pub class: DnsClass,
    pub ttl: u32,
    pub cpu: String,
    pub os: String,
}

/// EDNS0 pseudo-record, RFC 6891 section 6.1.2. CLASS carries the requestor's
/// UDP payload size and TTL the extended RCODE and flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptRecord {
    pub name: Option<String>,
    pub udp_payload_size: u16,
    pub ttl: u32,
    pub options: Vec<OptOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptOption {
    pub code: u16,
    pub length: u16,
    pub data: Bytes,
}

impl OptOption {
    pub fn new(code: u16, data: &[u8]) -> Self {
        Self {
            code,
            length: data.len() as u16,
            data: Bytes::copy_from_slice(data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceRecord {
    A(ARecord),
    Ns(DomainNameRecord),
    Cname(DomainNameRecord),
    HInfo(HInfoRecord),
    Opt(OptRecord),
}

impl ResourceRecord {
    pub fn name(&self) -> Option<&str> {
        match self {
            ResourceRecord::A(r) => r.name.as_deref(),
            ResourceRecord::Ns(r) | ResourceRecord::Cname(r) => r.name.as_deref(),
            ResourceRecord::HInfo(r) => r.name.as_deref(),
            ResourceRecord::Opt(r) => r.name.as_deref(),
        }
    }

    pub fn rtype(&self) -> DnsType {
        match self {
            ResourceRecord::A(_) => DnsType::A,
            ResourceRecord::Ns(_) => DnsType::Ns,
            ResourceRecord::Cname(_) => DnsType::Cname,
            ResourceRecord::HInfo(_) => DnsType::HInfo,
            ResourceRecord::Opt(_) => DnsType::Opt,
        }
    }

    /// `None` for OPT, whose CLASS field is not a class.
    pub fn class(&self) -> Option<DnsClass> {
        match self {
            ResourceRecord::A(r) => Some(r.class),
            ResourceRecord::Ns(r) | ResourceRecord::Cname(r) => Some(r.class),
            ResourceRecord::HInfo(r) => Some(r.class),
            ResourceRecord::Opt(_) => None,
        }
    }

    /// The value written to the CLASS field.
    pub fn numeric_class(&self) -> u16 {
        match self {
            ResourceRecord::Opt(r) => r.udp_payload_size,
            other => other.class().map(u16::from).unwrap_or_default(),
        }
    }

    pub fn ttl(&self) -> u32 {
        match self {
            ResourceRecord::A(r) => r.ttl,
            ResourceRecord::Ns(r) | ResourceRecord::Cname(r) => r.ttl,
            ResourceRecord::HInfo(r) => r.ttl,
            ResourceRecord::Opt(r) => r.ttl,
        }
    }

    /// Whether the RDATA holds a domain name that may be compressed.
    pub fn is_compressible(&self) -> bool {
        match self {
            ResourceRecord::Ns(_) | ResourceRecord::Cname(_) => true,
            ResourceRecord::A(_) | ResourceRecord::HInfo(_) | ResourceRecord::Opt(_) => false,
        }
    }

    pub fn is_cacheable(&self) -> bool {
        match self {
            // RFC 6891 section 6: OPT must not be cached, its TTL is not a TTL
            ResourceRecord::Opt(_) => false,
            ResourceRecord::A(_)
            | ResourceRecord::Ns(_)
            | ResourceRecord::Cname(_)
            | ResourceRecord::HInfo(_) => true,
        }
    }
}

fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or(".")
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = display_name(self.name());
        match self {
            ResourceRecord::A(r) => {
                write!(f, "{}\t{}\t{}\tA\t{}", name, r.ttl, r.class, r.address)
            }
            ResourceRecord::Ns(r) | ResourceRecord::Cname(r) => write!(
                f,
                "{}\t{}\t{}\t{}\t{}",
                name,
                r.ttl,
                r.class,
                self.rtype(),
                display_name(r.target.as_deref())
            ),
            ResourceRecord::HInfo(r) => write!(
                f,
                "{}\t{}\t{}\tHINFO\t{:?} {:?}",
                name, r.ttl, r.class, r.cpu, r.os
            ),
            ResourceRecord::Opt(r) => {
                write!(f, "{}\tOPT\tudp: {}", name, r.udp_payload_size)?;
                for option in &r.options {
                    write!(f, "; option {} ({} bytes)", option.code, option.length)?;
                }
                Ok(())
            }
        }
    }
}
