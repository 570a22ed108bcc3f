use std::path::PathBuf;
use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can occur while rendering pages or building the search index.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO error while reading a document.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// markdown-rs rejected the document.
    #[error("Render error at {location}: {message}")]
    Render {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// The syntax highlighter failed on a code block.
    #[error("Highlight error ({lang}): {message}")]
    Highlight {
        /// Language tag of the failing block
        lang: String,
        /// Error message
        message: String,
    },
    /// The HTML rewriter failed while post-processing rendered markup.
    #[error("Rewrite error: {0}")]
    Rewrite(String),
    /// The document source could not enumerate documents.
    #[error("Discovery error: {0}")]
    Discovery(String),
    /// A document path does not follow `<root>/<component>/docs/<locale>.md`.
    #[error("Document path does not match the component/locale convention: {}", .0.display())]
    UnmatchedPath(PathBuf),
    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
    /// Section payload could not be serialized.
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DocsError {
    /// Create a render error with location
    pub fn render_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Render {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create a highlight error for the given language
    pub fn highlight_error(lang: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Highlight {
            lang: lang.into(),
            message: message.into(),
        }
    }

    /// Attach a file path to the location of a render error.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::Render { message, location } => Self::Render {
                message,
                location: SourceLocation::with_file(file.into(), location.line, location.column),
            },
            other => other,
        }
    }
}

/// Non-fatal warnings that don't prevent rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// Code fence opened but never closed
    UnclosedCodeFence {
        /// Source location where the fence started
        location: SourceLocation,
        /// Fence marker character (backtick or tilde)
        marker: char,
        /// Surrounding context for error message
        context: String,
    },
}

impl ParseWarning {
    /// Get the location of this warning
    pub fn location(&self) -> &SourceLocation {
        match self {
            ParseWarning::UnclosedCodeFence { location, .. } => location,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnclosedCodeFence {
                location,
                marker,
                context,
            } => {
                write!(
                    f,
                    "Unclosed code fence ({}): {}, near '{}'",
                    marker, location, context
                )
            }
        }
    }
}

/// Collection of parse diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ParseWarning>,
}

impl ParseDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
