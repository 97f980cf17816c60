use thiserror::Error;

/// Raised when a configuration export does not have the layout the parser walks.
///
/// These are not recoverable: a document missing the interface tree comes from an
/// incompatible export format and nothing useful can be loaded from it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// A key on the path to the interface groups is absent.
    #[error("malformed document: missing key `{key}`")]
    MissingKey {
        /// The key that was looked up.
        key: String,
    },

    /// A node exists but is not the JSON type the parser needs.
    #[error("malformed document: expected {expected} at `{path}`")]
    UnexpectedShape {
        /// Slash-separated location of the offending node.
        path: String,
        /// Human-readable description of the expected type.
        expected: &'static str,
    },
}
