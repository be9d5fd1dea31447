use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// DNS TYPE / QTYPE codes, RFC 1035 section 3.2.2 and 3.2.3, plus OPT (RFC 6891).
///
/// Codes this crate has no name for are kept as `Unknown` so that they survive
/// a decode/encode cycle unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DnsType {
    A,
    Ns,
    Md,
    Mf,
    Cname,
    Soa,
    Mb,
    Mg,
    Mr,
    Null,
    Wks,
    Ptr,
    HInfo,
    MInfo,
    Mx,
    Txt,
    Opt,
    // query types only
    Axfr,
    MailB,
    MailA,
    Any,
    Unknown(u16),
}

impl From<u16> for DnsType {
    fn from(code: u16) -> Self {
        match code {
            1 => DnsType::A,
            2 => DnsType::Ns,
            3 => DnsType::Md,
            4 => DnsType::Mf,
            5 => DnsType::Cname,
            6 => DnsType::Soa,
            7 => DnsType::Mb,
            8 => DnsType::Mg,
            9 => DnsType::Mr,
            10 => DnsType::Null,
            11 => DnsType::Wks,
            12 => DnsType::Ptr,
            13 => DnsType::HInfo,
            14 => DnsType::MInfo,
            15 => DnsType::Mx,
            16 => DnsType::Txt,
            41 => DnsType::Opt,
            252 => DnsType::Axfr,
            253 => DnsType::MailB,
            254 => DnsType::MailA,
            255 => DnsType::Any,
            other => DnsType::Unknown(other),
        }
    }
}

impl From<DnsType> for u16 {
    fn from(t: DnsType) -> Self {
        match t {
            DnsType::A => 1,
            DnsType::Ns => 2,
            DnsType::Md => 3,
            DnsType::Mf => 4,
            DnsType::Cname => 5,
            DnsType::Soa => 6,
            DnsType::Mb => 7,
            DnsType::Mg => 8,
            DnsType::Mr => 9,
            DnsType::Null => 10,
            DnsType::Wks => 11,
            DnsType::Ptr => 12,
            DnsType::HInfo => 13,
            DnsType::MInfo => 14,
            DnsType::Mx => 15,
            DnsType::Txt => 16,
            DnsType::Opt => 41,
            DnsType::Axfr => 252,
            DnsType::MailB => 253,
            DnsType::MailA => 254,
            DnsType::Any => 255,
            DnsType::Unknown(code) => code,
        }
    }
}

impl fmt::Display for DnsType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            DnsType::A => "A",
            DnsType::Ns => "NS",
            DnsType::Md => "MD",
            DnsType::Mf => "MF",
            DnsType::Cname => "CNAME",
            DnsType::Soa => "SOA",
            DnsType::Mb => "MB",
            DnsType::Mg => "MG",
            DnsType::Mr => "MR",
            DnsType::Null => "NULL",
            DnsType::Wks => "WKS",
            DnsType::Ptr => "PTR",
            DnsType::HInfo => "HINFO",
            DnsType::MInfo => "MINFO",
            DnsType::Mx => "MX",
            DnsType::Txt => "TXT",
            DnsType::Opt => "OPT",
            DnsType::Axfr => "AXFR",
            DnsType::MailB => "MAILB",
            DnsType::MailA => "MAILA",
            DnsType::Any => "ANY",
            DnsType::Unknown(code) => return write!(f, "TYPE{}", code),
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {input:?}")]
pub struct ParseCodeError {
    kind: &'static str,
    input: String,
}

impl FromStr for DnsType {
    type Err = ParseCodeError;

    /// Accepts a mnemonic (`"cname"`), the RFC 3597 form (`"TYPE65"`) or a bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let numeric = upper.strip_prefix("TYPE").unwrap_or(&upper);
        if let Ok(code) = numeric.parse::<u16>() {
            return Ok(DnsType::from(code));
        }

        (1..=255u16)
            .map(DnsType::from)
            .find(|t| !matches!(t, DnsType::Unknown(_)) && t.to_string() == upper)
            .ok_or_else(|| ParseCodeError {
                kind: "type",
                input: s.to_string(),
            })
    }
}

/// DNS CLASS / QCLASS codes, RFC 1035 section 3.2.4 and 3.2.5.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DnsClass {
    In,
    Cs,
    Ch,
    Hs,
    Any,
    Unknown(u16),
}

impl From<u16> for DnsClass {
    fn from(code: u16) -> Self {
        match code {
            1 => DnsClass::In,
            2 => DnsClass::Cs,
            3 => DnsClass::Ch,
            4 => DnsClass::Hs,
            255 => DnsClass::Any,
            other => DnsClass::Unknown(other),
        }
    }
}

impl From<DnsClass> for u16 {
    fn from(c: DnsClass) -> Self {
        match c {
            DnsClass::In => 1,
            DnsClass::Cs => 2,
            DnsClass::Ch => 3,
            DnsClass::Hs => 4,
            DnsClass::Any => 255,
            DnsClass::Unknown(code) => code,
        }
    }
}

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            DnsClass::In => "IN",
            DnsClass::Cs => "CS",
            DnsClass::Ch => "CH",
            DnsClass::Hs => "HS",
            DnsClass::Any => "ANY",
            DnsClass::Unknown(code) => return write!(f, "CLASS{}", code),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DnsClass {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let numeric = upper.strip_prefix("CLASS").unwrap_or(&upper);
        if let Ok(code) = numeric.parse::<u16>() {
            return Ok(DnsClass::from(code));
        }

        match upper.as_str() {
            "IN" => Ok(DnsClass::In),
            "CS" => Ok(DnsClass::Cs),
            "CH" => Ok(DnsClass::Ch),
            "HS" => Ok(DnsClass::Hs),
            "ANY" => Ok(DnsClass::Any),
            _ => Err(ParseCodeError {
                kind: "class",
                input: s.to_string(),
            }),
        }
    }
}

pub type Name = String;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NameQuery {
    pub name: Name,
    pub q_type: DnsType,
}

impl NameQuery {
    pub fn new(name_str: &str, q_type: DnsType) -> Self {
        Self {
            name: Name::from(name_str),
            q_type,
        }
    }

    pub fn a_record(name_str: &str) -> Self {
        Self::new(name_str, DnsType::A)
    }
}
