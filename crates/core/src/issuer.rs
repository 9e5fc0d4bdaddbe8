use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Card-issuing institutions the classifier can recognize. `Unknown` is the
/// result for a statement matching none of the brand signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issuer {
    #[serde(rename = "HDFC")]
    Hdfc,
    #[serde(rename = "ICICI")]
    Icici,
    #[serde(rename = "SBI")]
    Sbi,
    #[serde(rename = "Axis Bank")]
    Axis,
    #[serde(rename = "American Express")]
    Amex,
    Unknown,
}

impl Issuer {
    pub fn as_str(self) -> &'static str {
        match self {
            Issuer::Hdfc => "HDFC",
            Issuer::Icici => "ICICI",
            Issuer::Sbi => "SBI",
            Issuer::Axis => "Axis Bank",
            Issuer::Amex => "American Express",
            Issuer::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Issuer {
    type Err = ParseIssuerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HDFC" => Ok(Issuer::Hdfc),
            "ICICI" => Ok(Issuer::Icici),
            "SBI" => Ok(Issuer::Sbi),
            "Axis Bank" => Ok(Issuer::Axis),
            "American Express" => Ok(Issuer::Amex),
            "Unknown" => Ok(Issuer::Unknown),
            other => Err(ParseIssuerError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issuer: {0:?}")]
pub struct ParseIssuerError(pub String);
