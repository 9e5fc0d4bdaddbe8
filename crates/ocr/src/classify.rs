use regex::Regex;

use cardex_core::Issuer;

use crate::re;

// Brand signatures. The short forms ("SBI", "AMEX") only match on word
// boundaries so account codes containing them don't misclassify.

re!(re_hdfc, r"(?i)hdfc\s+bank");
re!(re_icici, r"(?i)icici\s+bank");
re!(re_sbi, r"(?i)state\s+bank\s+of\s+india|\bSBI\b");
re!(re_axis, r"(?i)axis\s+bank");
re!(re_amex, r"(?i)american\s+express|\bAMEX\b");

/// Decide which issuer produced a statement. Signatures are evaluated in a
/// fixed order and the first match wins, so a document naming two banks
/// classifies as the earlier-listed one. No match yields `Unknown`.
pub fn classify(text: &str) -> Issuer {
    let signatures: [(&Regex, Issuer); 5] = [
        (re_hdfc(), Issuer::Hdfc),
        (re_icici(), Issuer::Icici),
        (re_sbi(), Issuer::Sbi),
        (re_axis(), Issuer::Axis),
        (re_amex(), Issuer::Amex),
    ];
    signatures
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, issuer)| *issuer)
        .unwrap_or(Issuer::Unknown)
}
