use crate::foundation::error::{StyleError, StyleResult};

/// Host-provided destination for generated output (file downloads, clipboard).
///
/// Generators never own platform resources; they hand finished bytes to a sink.
pub trait OutputSink {
    fn emit_file(&mut self, bytes: &[u8], filename: &str) -> StyleResult<()>;

    fn copy_text(&mut self, text: &str) -> StyleResult<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Collects everything in memory. Useful for embedding hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub files: Vec<EmittedFile>,
    pub clipboard: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for MemorySink {
    fn emit_file(&mut self, bytes: &[u8], filename: &str) -> StyleResult<()> {
        validate_filename(filename)?;
        self.files.push(EmittedFile {
            filename: filename.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn copy_text(&mut self, text: &str) -> StyleResult<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}

/// Bare file names only: no separators, no parent references.
pub fn validate_filename(filename: &str) -> StyleResult<()> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
    {
        return Err(StyleError::sink(format!(
            "invalid output filename '{filename}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_outputs() {
        let mut sink = MemorySink::new();
        sink.emit_file(b"<svg/>", "blob.svg").unwrap();
        sink.copy_text("a").unwrap();
        sink.copy_text("b").unwrap();
        assert_eq!(sink.files.len(), 1);
        assert_eq!(sink.files[0].bytes, b"<svg/>");
        assert_eq!(sink.clipboard.as_deref(), Some("b"));
    }

    #[test]
    fn path_like_names_are_rejected() {
        let mut sink = MemorySink::new();
        assert!(sink.emit_file(b"", "../x.svg").is_err());
        assert!(sink.emit_file(b"", "a/b.svg").is_err());
        assert!(sink.emit_file(b"", "").is_err());
    }
}
