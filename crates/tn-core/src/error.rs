use thiserror::Error;

pub type TnResult<T> = Result<T, TnError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TnError {
    #[error("Invalid volume '{text}': {reason}")]
    InvalidVolume { text: String, reason: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}
