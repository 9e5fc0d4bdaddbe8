use regex::Regex;

use cardex_core::{ExtractedRecord, Issuer, SENTINEL};

use crate::re;

// ── Extraction rules ─────────────────────────────────────────────────────────
//
// Each field has one label-anchored rule: the label phrase must appear, then
// an unbounded non-greedy span (newlines included), then the value shape.
// The first match in document order wins. The card variant is the exception:
// it matches anywhere, no label.

re!(re_card_last4,
    r"(?is)card\s+no.*?(\d{4})");
re!(re_due_date,
    r"(?is)payment\s+due\s+date.*?(\d{2}[-/]\d{2}[-/]\d{4})");
re!(re_statement_date,
    r"(?is)statement\s+date.*?(\d{2}[-/]\d{2}[-/]\d{4})");
re!(re_total_balance,
    r"(?is)total\s+amount\s+due.*?([\d,]+\.\d{2})");
re!(re_card_variant,
    r"(?i)\b(platinum|millennia|regalia|infinia|signature|ultimate)\b");

// ── Public extraction API ────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Mine the structured fields from normalized statement text. Rules are
    /// independent per field; a miss yields the sentinel for that field
    /// alone. The issuer is decided upstream and carried through untouched.
    pub fn extract(text: &str, issuer: Issuer) -> ExtractedRecord {
        ExtractedRecord {
            issuer,
            last_4_digits: capture_or_sentinel(re_card_last4(), text),
            card_variant: capture_or_sentinel(re_card_variant(), text),
            billing_cycle_date: capture_or_sentinel(re_statement_date(), text),
            payment_due_date: capture_or_sentinel(re_due_date(), text),
            total_balance: capture_or_sentinel(re_total_balance(), text),
        }
    }
}

/// First capture group of the first match, verbatim.
fn capture_or_sentinel(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| SENTINEL.to_string())
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const HDFC_STATEMENT: &str = "HDFC Bank Credit Card Statement\n\
        Card No: XXXX XXXX XXXX 4521\n\
        Platinum Edge\n\
        Statement Date: 01-08-2025\n\
        Payment Due Date: 21-08-2025\n\
        Total Amount Due: 45,230.50";

    #[test]
    fn extracts_all_fields() {
        let r = Extractor::extract(HDFC_STATEMENT, Issuer::Hdfc);
        assert_eq!(r.issuer, Issuer::Hdfc);
        assert_eq!(r.last_4_digits, "4521");
        assert_eq!(r.card_variant, "Platinum");
        assert_eq!(r.billing_cycle_date, "01-08-2025");
        assert_eq!(r.payment_due_date, "21-08-2025");
        assert_eq!(r.total_balance, "45,230.50");
    }

    #[test]
    fn due_date_value_is_verbatim() {
        let r = Extractor::extract("Payment Due Date: 05/11/2025", Issuer::Unknown);
        assert_eq!(r.payment_due_date, "05/11/2025");
    }

    #[test]
    fn balance_with_currency_prefix() {
        let r = Extractor::extract("Total Amount Due Rs. 12,345.67", Issuer::Unknown);
        assert_eq!(r.total_balance, "12,345.67");
    }

    #[test]
    fn missing_label_yields_sentinel() {
        let r = Extractor::extract("Payment Due Date: 05/11/2025", Issuer::Unknown);
        // No "Card No" label anywhere.
        assert_eq!(r.last_4_digits, "N/A");
        assert_eq!(r.total_balance, "N/A");
    }

    #[test]
    fn no_fields_at_all_is_all_sentinel() {
        let r = Extractor::extract("lorem ipsum dolor sit amet", Issuer::Unknown);
        assert!(r.is_empty());
    }

    #[test]
    fn empty_text_is_all_sentinel() {
        let r = Extractor::extract("", Issuer::Unknown);
        assert!(r.is_empty());
    }

    #[test]
    fn label_and_value_may_span_lines() {
        let r = Extractor::extract("Payment Due Date\nfor this cycle:\n21-08-2025", Issuer::Hdfc);
        assert_eq!(r.payment_due_date, "21-08-2025");
    }

    #[test]
    fn first_label_occurrence_wins() {
        let text = "Payment Due Date: 01-01-2025\nPayment Due Date: 02-02-2025";
        let r = Extractor::extract(text, Issuer::Hdfc);
        assert_eq!(r.payment_due_date, "01-01-2025");
    }

    #[test]
    fn card_digits_are_first_run_after_label() {
        // Masked card numbers leave only the tail digits.
        let r = Extractor::extract("Card No: XXXX-XXXX-XXXX-9876", Issuer::Unknown);
        assert_eq!(r.last_4_digits, "9876");
    }

    #[test]
    fn card_label_is_exact() {
        // "Card Number" is not the label the rule anchors on.
        let r = Extractor::extract("Card Number: 1234 5678 9012 3456", Issuer::Unknown);
        assert_eq!(r.last_4_digits, "N/A");
    }

    #[test]
    fn variant_matches_anywhere_without_label() {
        let r = Extractor::extract("Your MILLENNIA card earned 320 points", Issuer::Hdfc);
        assert_eq!(r.card_variant, "MILLENNIA");
    }

    #[test]
    fn variant_requires_word_boundary() {
        let r = Extractor::extract("ultimatum notice", Issuer::Unknown);
        assert_eq!(r.card_variant, "N/A");
    }

    #[test]
    fn fields_are_independent() {
        let text = "Card No 1111 2222\nTotal Amount Due: 99.00";
        let r = Extractor::extract(text, Issuer::Unknown);
        assert_eq!(r.last_4_digits, "1111");
        assert_eq!(r.total_balance, "99.00");
        assert_eq!(r.payment_due_date, "N/A");
        assert_eq!(r.billing_cycle_date, "N/A");
    }

    #[test]
    fn amount_requires_two_decimals() {
        let r = Extractor::extract("Total Amount Due: 12,345 by 21-08", Issuer::Unknown);
        assert_eq!(r.total_balance, "N/A");
    }

    #[test]
    fn date_requires_full_shape() {
        // Two-digit year doesn't satisfy the rule.
        let r = Extractor::extract("Payment Due Date: 05/11/25", Issuer::Unknown);
        assert_eq!(r.payment_due_date, "N/A");
    }

    #[test]
    fn labels_are_case_insensitive() {
        let r = Extractor::extract("PAYMENT DUE DATE 21/08/2025", Issuer::Unknown);
        assert_eq!(r.payment_due_date, "21/08/2025");
    }

    #[test]
    fn no_panic_on_garbage_input() {
        let _ = Extractor::extract("!@#$%^&*()\n\0\x01\x02", Issuer::Unknown);
    }
}
