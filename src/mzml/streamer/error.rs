/// Errors that can occur during mzML parsing
#[derive(Debug, thiserror::Error)]
pub enum MzMLError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid mzML document structure
    #[error("Invalid mzML structure: {0}")]
    InvalidStructure(String),

    /// Required XML attribute is missing
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    /// Numeric text that does not parse; fatal for the whole run
    #[error("Invalid numeric value {value:?} for {field}")]
    InvalidNumber {
        /// Attribute or CV term the value belongs to
        field: String,
        /// The offending text
        value: String,
    },
}
