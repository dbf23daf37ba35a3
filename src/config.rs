use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CONFIG_FILE: &str = concat!(".", env!("CARGO_PKG_NAME"), "config");
const SSH_DIR: &str = ".ssh";
const SSH_PROGRAM: &str = "ssh";

/// Where things live. Built once in `main` and handed down, so nothing
/// below it looks at the environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub home: PathBuf,
    pub config_path: PathBuf,
    pub ssh_dir: PathBuf,
    pub ssh_program: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
        Ok(Self::with_home(home))
    }

    pub fn with_home<P: AsRef<Path>>(home: P) -> Self {
        let home = home.as_ref().to_path_buf();
        Settings {
            config_path: home.join(CONFIG_FILE),
            ssh_dir: home.join(SSH_DIR),
            ssh_program: SSH_PROGRAM.to_string(),
            home,
        }
    }

    pub fn identity_path(&self, identity: &str) -> PathBuf {
        self.ssh_dir.join(identity)
    }
}
