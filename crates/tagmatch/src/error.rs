use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to build text pattern regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("{construct} pattern has no inner pattern to match")]
    MissingInner { construct: &'static str },

    #[error("match recursion exceeded the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
