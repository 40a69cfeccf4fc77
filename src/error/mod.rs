mod config;
mod input;
mod io;
mod resolve;

pub use config::ConfigError;
pub use input::InputError;
pub use io::IoError;
pub use resolve::ResolveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

pub type Result<T> = std::result::Result<T, Error>;
