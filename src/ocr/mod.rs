//! Receipt amount extraction.

pub mod extractor;
pub mod recognizer;

pub use extractor::{
    DEFAULT_OCR_CURRENCY, ExtractedAmount, extract_amount, extract_amount_with_default,
};
pub use recognizer::{PlainTextRecognizer, TextRecognizer, scan_receipt};
