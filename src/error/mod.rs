use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read from or write to the console")]
    ConsoleError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
