use super::extractor::{ExtractedAmount, extract_amount_with_default};
use crate::errors::{AppError, AppResult};
use crate::money::Currency;

/// OCR engine seam: image bytes in, recognised text out.
///
/// Recognition is slow and lives outside the planner; the extractor only
/// ever sees the resulting text.
pub trait TextRecognizer {
    fn recognize(&self, image: &[u8]) -> AppResult<String>;
}

/// Treats the input as text that was already recognised elsewhere
/// (e.g. a `.txt` dump from an OCR tool).
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRecognizer;

impl TextRecognizer for PlainTextRecognizer {
    fn recognize(&self, image: &[u8]) -> AppResult<String> {
        String::from_utf8(image.to_vec())
            .map_err(|e| AppError::Other(format!("receipt text is not valid UTF-8: {e}")))
    }
}

/// Recognise and extract in one go. `Ok(None)` means "fall back to
/// manual entry".
pub fn scan_receipt(
    recognizer: &dyn TextRecognizer,
    image: &[u8],
    fallback: Currency,
) -> AppResult<Option<ExtractedAmount>> {
    let text = recognizer.recognize(image)?;
    Ok(extract_amount_with_default(&text, fallback))
}
