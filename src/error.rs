use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not serialize connections: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid target '{0}', expected <username>@<domain>[:<port>]")]
    InvalidFormat(String),

    #[error("name {0} is already in use")]
    DuplicateName(String),

    #[error("'{0}' cannot be used as a connection name")]
    InvalidName(String),

    #[error("could not find {0}")]
    NotFound(String),

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("could not launch ssh: {0}")]
    Launch(#[source] io::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
