use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::issuer::Issuer;

/// Marker for a field whose extraction rule found no match.
pub const SENTINEL: &str = "N/A";

/// The structured fields mined from one statement.
///
/// Values are the literal substrings the extraction rules matched; no
/// parsing happens at extraction time. A field whose rule did not match
/// holds [`SENTINEL`], and every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub issuer: Issuer,
    pub last_4_digits: String,
    pub card_variant: String,
    pub billing_cycle_date: String,
    pub payment_due_date: String,
    pub total_balance: String,
}

impl ExtractedRecord {
    /// A record with every field at the sentinel.
    pub fn with_issuer(issuer: Issuer) -> Self {
        ExtractedRecord {
            issuer,
            last_4_digits: SENTINEL.to_string(),
            card_variant: SENTINEL.to_string(),
            billing_cycle_date: SENTINEL.to_string(),
            payment_due_date: SENTINEL.to_string(),
            total_balance: SENTINEL.to_string(),
        }
    }

    /// True when no extraction rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.last_4_digits == SENTINEL
            && self.card_variant == SENTINEL
            && self.billing_cycle_date == SENTINEL
            && self.payment_due_date == SENTINEL
            && self.total_balance == SENTINEL
    }

    /// Payment due date, parsed on demand. `None` for the sentinel or an
    /// unparseable value.
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_statement_date(&self.payment_due_date)
    }

    /// Statement (billing cycle) date, parsed on demand.
    pub fn cycle_date(&self) -> Option<NaiveDate> {
        parse_statement_date(&self.billing_cycle_date)
    }

    /// Total amount due as a decimal, ignoring thousands separators.
    pub fn balance(&self) -> Option<Decimal> {
        if self.total_balance == SENTINEL {
            return None;
        }
        Decimal::from_str(&self.total_balance.replace(',', "")).ok()
    }
}

/// Statements print dates as `DD-MM-YYYY` or `DD/MM/YYYY`.
fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    for fmt in ["%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}
