use crate::re;

re!(re_hspace, r"[ \t]+");

/// Collapse runs of spaces and tabs within each line to a single space and
/// strip trailing whitespace. Line structure is preserved; no lowercasing
/// happens here, the extraction rules match case-insensitively instead.
pub fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| re_hspace().replace_all(line, " ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join per-page OCR text into one logical document, each page's cleaned
/// text followed by a single newline. A page with no extractable text
/// contributes only its boundary newline.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(collapse_whitespace(page.as_ref()).trim_end());
        out.push('\n');
    }
    out
}
