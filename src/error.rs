//! Error types for PDF assembly.
//!
//! Every operation of the assembler is an in-memory transformation except the
//! final write, so errors are terminal for the call that produced them and are
//! handed back to the caller untouched.

/// Result type alias for PDF assembly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text was drawn before any font was selected on the page
    #[error("No font selected: call set_font before drawing text")]
    NoFontSelected,

    /// A template key was registered twice
    #[error("Duplicate template key: '{0}'")]
    DuplicateKey(String),

    /// The document has already been serialized
    #[error("Document has already been serialized")]
    AlreadySerialized,

    /// Writing the finished byte stream to the sink failed
    #[error("Failed to write PDF to sink: {0}")]
    SinkWriteFailed(#[source] std::io::Error),

    /// Font family/style combination is not one of the standard fonts
    #[error("Unknown font: family '{family}', style '{style}'")]
    UnknownFont {
        /// Requested family
        family: String,
        /// Requested style
        style: String,
    },

    /// Paper dimensions are not positive finite numbers
    #[error("Invalid paper size: {0}")]
    InvalidPaperSize(String),

    /// Orientation string could not be parsed
    #[error("Invalid orientation: '{0}'")]
    InvalidOrientation(String),

    /// A current-page operation was used before any page was added
    #[error("No current page: add a page first")]
    NoCurrentPage,

    /// The page importer failed to supply a page
    #[error("Import error: {0}")]
    Import(String),

    /// Requested source page does not exist
    #[error("Page {page} not found in '{path}'")]
    PageNotFound {
        /// Source path
        path: String,
        /// 1-indexed page number
        page: u32,
    },

    /// A coordinate, size, width or color component is NaN or infinite
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber {
        /// What the number was for
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A content stream refers to a font or template the document does not know
    #[error("Unresolved resource: {0}")]
    UnresolvedResource(String),

    /// An allocated object id has no object to serialize
    #[error("Allocated object {0} has no body")]
    MissingObject(u32),

    /// Invalid configuration document
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error while building bytes in memory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
