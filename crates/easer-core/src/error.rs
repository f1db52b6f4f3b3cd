use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown easing function \"{name}\", please use one of the following: {available}")]
    UnknownEasing { name: String, available: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
