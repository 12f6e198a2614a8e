use thiserror::Error;

pub type LoopResult<T> = Result<T, LoopError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoopError {
    #[error("non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
