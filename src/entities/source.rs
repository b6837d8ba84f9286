//! Raw input: uploaded files and tokenized lines

/// An MTM file as handed to the parser: a display name and its raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name used to tag every row (no directory component)
    pub name: String,

    /// Undecoded file contents
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// One non-blank line split into trimmed fields
///
/// Records are immutable once built; the table builder consumes them
/// into [`TestPlanRow`](super::TestPlanRow)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    filename: String,
    line: String,
    fields: Vec<String>,
}

impl RawRecord {
    pub fn new(filename: impl Into<String>, line: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            filename: filename.into(),
            line: line.into(),
            fields,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The original line text, before splitting
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}
