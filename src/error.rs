use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("command spec has no arguments to invoke")]
    EmptyCommand,

    #[error("invalid environment entry (expected KEY=VALUE): {0}")]
    InvalidEnvEntry(String),
}

pub type Result<T> = std::result::Result<T, Error>;
