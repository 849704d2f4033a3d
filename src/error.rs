/// Main error type for the library.
#[derive(Debug)]
pub enum CloudError {
    /// Used when a buffer has the wrong element type, channel count or shape.
    InvalidInput(String),
    /// Used when the user pass a logical invalid scalar parameter to a function.
    InvalidArgument(String),
    /// Parameters could not be read from their serialized form.
    Parser(String),
}

/// Result alias used by the builders.
pub type Result<T> = std::result::Result<T, CloudError>;

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CloudError::InvalidInput(err) => write!(f, "Invalid input: {}", err),
            CloudError::InvalidArgument(err) => write!(f, "Invalid argument: {}", err),
            CloudError::Parser(err) => write!(f, "Parser error: {}", err),
        }
    }
}

impl CloudError {
    /// Create a error with the kind `InvalidInput`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn invalid_input<T: ToString>(msg: T) -> Self {
        CloudError::InvalidInput(msg.to_string())
    }

    /// Create a error with the kind `InvalidArgument`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn invalid_argument<T: ToString>(msg: T) -> Self {
        CloudError::InvalidArgument(msg.to_string())
    }
}

impl From<serde_json::Error> for CloudError {
    fn from(err: serde_json::Error) -> Self {
        CloudError::Parser(err.to_string())
    }
}

impl std::error::Error for CloudError {}
