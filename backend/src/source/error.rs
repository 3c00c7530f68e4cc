//! Error types for utilization source operations.
//!
//! Errors carry a structured context naming the operation and endpoint so a
//! failed refresh can be traced back to the request that caused it.

use std::fmt;

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Structured context for source errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "fetch_utilization", "fetch_systems")
    pub operation: Option<String>,
    /// The endpoint or resource involved
    pub endpoint: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref endpoint) = self.endpoint {
            parts.push(format!("endpoint={}", endpoint));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request could not be sent or the connection dropped.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// The API answered with a non-success status code.
    #[error("HTTP status {status}: {message} {context}")]
    StatusError {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    /// The response body was not valid JSON.
    #[error("Decode error: {message} {context}")]
    DecodeError {
        message: String,
        context: ErrorContext,
    },

    /// The response was JSON but not a sequence of records.
    #[error("Unexpected response shape: {message} {context}")]
    UnexpectedShape {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },
}

impl SourceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::StatusError { context, .. }
            | Self::DecodeError { context, .. }
            | Self::UnexpectedShape { context, .. }
            | Self::ConfigurationError { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::StatusError { context, .. }
            | Self::DecodeError { context, .. }
            | Self::UnexpectedShape { context, .. }
            | Self::ConfigurationError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add or update the endpoint in the error context.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.context_mut().endpoint = Some(endpoint.into());
        self
    }

    /// Add or update free-form details, e.g. the query that was sent.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.context_mut().details = Some(details.into());
        self
    }
}
