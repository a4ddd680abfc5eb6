//! Document names, kinds and contents.
//!
//! A document is a flat file directly under the store root, so its name is
//! its identity. Names are validated once, here, before any adapter sees them:
//! a valid [`DocumentName`] is always a single path segment that cannot climb
//! out of the root.

use std::fmt;
use std::path::Path;

use thiserror::Error;

const DEFAULT_EXTENSION: &str = "txt";
const MARKDOWN_EXTENSION: &str = "md";
/// Longest name, in bytes, a common filesystem accepts for one entry.
pub const MAX_NAME_BYTES: usize = 255;

/// Validation errors raised while constructing a [`DocumentName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentNameError {
    /// The name was empty once surrounding whitespace was removed.
    #[error("Document must have a name.")]
    Blank,
    /// The name contains a separator or a NUL byte, starts with a dot, or
    /// is longer than [`MAX_NAME_BYTES`].
    #[error("Document name is invalid.")]
    Invalid,
}

/// How a document's bytes are presented to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Rendered to HTML through the markdown renderer.
    Markdown,
    /// Served verbatim as `text/plain`.
    PlainText,
}

/// Safe, single-segment document file name.
///
/// ## Invariants
/// - non-empty;
/// - contains no `/`, `\` or NUL;
/// - does not start with `.` (which also excludes `.` and `..`);
/// - at most [`MAX_NAME_BYTES`] bytes long.
///
/// # Examples
/// ```
/// use cms::domain::{DocumentKind, DocumentName};
///
/// let name = DocumentName::parse("notes.md").unwrap();
/// assert_eq!(name.kind(), DocumentKind::Markdown);
/// assert!(DocumentName::parse("../secrets.yaml").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentName(String);

impl DocumentName {
    /// Validate a name exactly as supplied.
    pub fn parse(raw: &str) -> Result<Self, DocumentNameError> {
        if raw.is_empty() {
            return Err(DocumentNameError::Blank);
        }
        if raw.len() > MAX_NAME_BYTES
            || raw.starts_with('.')
            || raw.contains(['/', '\\', '\0'])
        {
            return Err(DocumentNameError::Invalid);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Normalise a name typed into the "new document" form.
    ///
    /// Surrounding whitespace is trimmed, and a name without an extension
    /// gains `.txt`. Only document creation applies this rule; save, read
    /// and delete use [`DocumentName::parse`].
    ///
    /// # Examples
    /// ```
    /// use cms::domain::{DocumentName, DocumentNameError};
    ///
    /// assert_eq!(DocumentName::for_new_document(" todo ").unwrap().as_str(), "todo.txt");
    /// assert_eq!(DocumentName::for_new_document("a.md").unwrap().as_str(), "a.md");
    /// assert_eq!(
    ///     DocumentName::for_new_document("   "),
    ///     Err(DocumentNameError::Blank)
    /// );
    /// ```
    pub fn for_new_document(raw: &str) -> Result<Self, DocumentNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DocumentNameError::Blank);
        }
        if Path::new(trimmed).extension().is_some() {
            Self::parse(trimmed)
        } else {
            Self::parse(&format!("{trimmed}.{DEFAULT_EXTENSION}"))
        }
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Content kind implied by the extension alone.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        match Path::new(&self.0).extension().and_then(|ext| ext.to_str()) {
            Some(MARKDOWN_EXTENSION) => DocumentKind::Markdown,
            _ => DocumentKind::PlainText,
        }
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<Path> for DocumentName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// A document together with its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: DocumentName,
    content: Vec<u8>,
}

impl Document {
    /// Pair a name with content read from the store.
    #[must_use]
    pub fn new(name: DocumentName, content: Vec<u8>) -> Self {
        Self { name, content }
    }

    /// Document name.
    #[must_use]
    pub fn name(&self) -> &DocumentName {
        &self.name
    }

    /// Content kind derived from the name.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        self.name.kind()
    }

    /// Raw bytes.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    /// Consume the document and return its bytes.
    #[must_use]
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}
