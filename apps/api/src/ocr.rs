//! # OCR Adapter
//!
//! The seam between uploaded bytes and text lines.
//!
//! ```text
//!   bytes + mimetype ──► OcrEngine::extract ──► OcrOutput { lines, meta }
//! ```
//!
//! Only [`StubOcr`] ships today. A real engine implements [`OcrEngine`] and
//! is handed to [`crate::AppState`] in place of the stub; nothing downstream
//! changes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shrinkshield_core::validation::essence;
use shrinkshield_core::{CoreError, CoreResult};
use tracing::debug;

/// Text extracted from one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Text lines in reading order.
    pub lines: Vec<String>,
    pub meta: OcrMeta,
}

/// Which engine produced an [`OcrOutput`] and from what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrMeta {
    /// Short engine identifier, stored with every receipt.
    pub engine: String,
    pub mimetype: String,
}

/// Something that turns receipt bytes into text lines.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extracts text lines from an upload.
    ///
    /// ## Errors
    /// `CoreError::OcrFailed` when nothing usable can be read.
    async fn extract(&self, bytes: &[u8], mimetype: &str) -> CoreResult<OcrOutput>;
}

/// Placeholder engine.
///
/// - `text/plain` uploads are treated as already transcribed: their
///   non-blank lines come back as-is.
/// - Anything else yields one `[placeholder OCR] bytes=<n> mimetype=<m>` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubOcr;

impl StubOcr {
    pub const ENGINE: &'static str = "stub";
}

#[async_trait]
impl OcrEngine for StubOcr {
    async fn extract(&self, bytes: &[u8], mimetype: &str) -> CoreResult<OcrOutput> {
        let lines = if essence(mimetype) == "text/plain" {
            let text = std::str::from_utf8(bytes).map_err(|_| CoreError::OcrFailed {
                reason: "text upload is not valid UTF-8".to_string(),
            })?;

            let lines: Vec<String> = text
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect();

            if lines.is_empty() {
                return Err(CoreError::OcrFailed {
                    reason: "no text lines".to_string(),
                });
            }
            lines
        } else {
            vec![format!(
                "[placeholder OCR] bytes={} mimetype={}",
                bytes.len(),
                mimetype
            )]
        };

        debug!(engine = Self::ENGINE, lines = lines.len(), "OCR complete");

        Ok(OcrOutput {
            lines,
            meta: OcrMeta {
                engine: Self::ENGINE.to_string(),
                mimetype: mimetype.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_for_images() {
        let out = StubOcr.extract(&[0u8; 12], "image/png").await.unwrap();

        assert_eq!(out.lines, vec!["[placeholder OCR] bytes=12 mimetype=image/png"]);
        assert_eq!(out.meta.engine, "stub");
        assert_eq!(out.meta.mimetype, "image/png");
    }

    #[tokio::test]
    async fn test_text_lines_pass_through() {
        let text = b"FRESH MART\r\n\r\nDistilled Water 1 L 1.29  \n   \nCola 2 L 1.99\n";
        let out = StubOcr.extract(text, "text/plain; charset=utf-8").await.unwrap();

        assert_eq!(
            out.lines,
            vec!["FRESH MART", "Distilled Water 1 L 1.29", "Cola 2 L 1.99"]
        );
    }

    #[tokio::test]
    async fn test_blank_text_fails() {
        let err = StubOcr.extract(b" \n\n ", "text/plain").await.unwrap_err();
        assert!(matches!(err, CoreError::OcrFailed { .. }));
    }

    #[tokio::test]
    async fn test_invalid_utf8_fails() {
        let err = StubOcr.extract(&[0xff, 0xfe, 0x41], "text/plain").await.unwrap_err();
        assert!(matches!(err, CoreError::OcrFailed { .. }));
    }
}
