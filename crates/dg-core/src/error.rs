use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Weight for {what} is not comparable with itself")]
    IncomparableWeight { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
