//! Process-level error type.
//!
//! Exit-code conventions:
//! - 2: usage/configuration error (bad mode/exponent pair, bad flags, bad paths)
//! - 3: input data error (unreadable/invalid CSV or model JSON)
//!
//! Numerical degeneracies during fitting are *not* errors; they surface as an
//! unfit model (see `fit::fitter`).

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// A contradictory or out-of-range mode/exponent selection.
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// An unreadable or malformed input file.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
