use thiserror::Error;

/// Errors returned by the validating (`try_*`) API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The lower endpoint lies above the upper endpoint.
    #[error("invalid interval: low {low} is greater than high {high}")]
    InvalidInterval {
        /// `Debug` rendering of the offending lower endpoint.
        low: String,
        /// `Debug` rendering of the offending upper endpoint.
        high: String,
    },
}

impl Error {
    pub(crate) fn invalid_interval<K: std::fmt::Debug>(low: &K, high: &K) -> Self {
        Error::InvalidInterval {
            low: format!("{:?}", low),
            high: format!("{:?}", high),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
