//! Text extraction from uploaded files.
//!
//! Extraction never fails outward: a PDF that cannot be parsed degrades to
//! an empty string (logged server-side), which the caller then treats as
//! "no text submitted". A PDF that parses always yields at least one
//! newline per page, so a scanned document with no recoverable text still
//! counts as a submission.

use tracing::warn;

/// Extract text from an uploaded file, routing by extension.
///
/// `.pdf` goes through the PDF extractor; `.txt` and anything else is
/// decoded as UTF-8 with invalid sequences dropped. The extension match is
/// case-insensitive.
pub fn extract_text(filename: &str, bytes: &[u8]) -> String {
    if filename.to_lowercase().ends_with(".pdf") {
        extract_pdf_text(bytes)
    } else {
        decode_text(bytes)
    }
}

/// Pull the text out of PDF bytes, one page at a time, prepending a newline
/// before each page's text. Any extraction error yields "".
fn extract_pdf_text(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem_by_pages(bytes) {
        Ok(pages) => pages.iter().fold(String::new(), |mut acc, page| {
            acc.push('\n');
            acc.push_str(page);
            acc
        }),
        Err(e) => {
            warn!(error = %e, "PDF text extraction failed");
            String::new()
        }
    }
}

/// Decode bytes as UTF-8. Valid input comes back unchanged; invalid input
/// is decoded with the offending sequences dropped.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).replace('\u{FFFD}', ""),
    }
}
