//! Error types for the Nova shader engine
//!
//! This module defines the error taxonomy for variant construction:
//! compilation, assembly, and device upload failures are all recoverable
//! and leave the variant cache untouched.

use std::fmt;

/// Result type for shader engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend compiler rejected the program + key combination
    CompileFailed(String),

    /// Assembler produced no usable binary for an otherwise-valid IR
    AssembleFailed(String),

    /// Device memory upload was refused or the write failed
    UploadFailed(String),

    /// Out of device memory
    OutOfMemory,

    /// Invalid resource (token stream, descriptor, ...)
    InvalidResource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompileFailed(msg) => write!(f, "Compile failed: {}", msg),
            Error::AssembleFailed(msg) => write!(f, "Assemble failed: {}", msg),
            Error::UploadFailed(msg) => write!(f, "Upload failed: {}", msg),
            Error::OutOfMemory => write!(f, "Out of device memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Construct an [`Error::InvalidResource`], logging it through the engine logger
///
/// # Example
///
/// ```no_run
/// # use nova_shader_engine::engine_err;
/// use nova_shader_engine::nova::Result;
///
/// fn first_token(tokens: &[u32]) -> Result<u32> {
///     tokens
///         .first()
///         .copied()
///         .ok_or_else(|| engine_err!("nova::ShaderProgram", "empty token stream"))
/// }
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::nova::Error::InvalidResource(message)
    }};
}

/// Log and return an [`Error::InvalidResource`] from the current function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
