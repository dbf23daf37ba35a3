use std::{
    fs::{self, OpenOptions},
    io::{Read, Write},
    ops::Deref,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    record::{ConnectionRecord, DEFAULT_IDENTITY},
    target::Target,
    Error, Result,
};

/// Names that the command line treats as subcommands. A record with one of
/// these names could never be launched by name.
pub const RESERVED_NAMES: &[&str] = &["add", "remove", "edit", "ls", "help", "-h", "--help"];

/// Ordered set of connection records backed by a JSON file.
///
/// The whole file is read on [`ConfigStore::open`] and rewritten on
/// [`ConfigStore::save`]; nothing is written implicitly.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    records: Vec<ConnectionRecord>,
}

impl ConfigStore {
    /// Loads the store, creating an empty file if none exists.
    ///
    /// Content that is empty or does not parse as a record list is treated as
    /// an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = PathBuf::from(path.as_ref());
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::io(&path, e))?;

        let records = if data.iter().all(u8::is_ascii_whitespace) {
            Vec::new()
        } else {
            match serde_json::from_slice(&data) {
                Ok(records) => records,
                Err(e) => {
                    warn!("ignoring unreadable config {}: {}", path.display(), e);
                    Vec::new()
                }
            }
        };

        debug!("loaded {} connection(s) from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file with the current records. A symlinked config is
    /// written through to its target.
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_vec(&self.records)?;

        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let mut tmp = target.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let written = write_synced(&tmp, &data)
            .and_then(|()| fs::rename(&tmp, &target).map_err(|e| Error::io(&target, e)));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written?;

        debug!("wrote {} connection(s) to {}", self.records.len(), target.display());
        Ok(())
    }

    /// Appends a new record. `target` is `<username>@<domain>[:<port>]`.
    pub fn add(
        &mut self,
        name: &str,
        target: &str,
        identity: Option<&str>,
    ) -> Result<ConnectionRecord> {
        if name.is_empty() || RESERVED_NAMES.contains(&name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        if self.find(name).is_some() {
            return Err(Error::DuplicateName(name.to_string()));
        }

        let target: Target = target.parse()?;
        let identity = identity
            .filter(|identity| !identity.is_empty())
            .unwrap_or(DEFAULT_IDENTITY);

        let record = ConnectionRecord {
            name: name.to_string(),
            domain: target.domain,
            username: target.username,
            identity: identity.to_string(),
            port: target.port,
        };
        self.records.push(record.clone());

        Ok(record)
    }

    /// Drops every record called `name` and returns how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.name != name);
        before - self.records.len()
    }

    /// Points the records called `name` at a new target. The identity is
    /// left as it was. Returns how many records changed.
    pub fn edit(&mut self, name: &str, target: &str) -> Result<usize> {
        let target: Target = target.parse()?;

        let mut updated = 0;
        for record in self.records.iter_mut().filter(|record| record.name == name) {
            record.username = target.username.clone();
            record.domain = target.domain.clone();
            record.port = target.port.clone();
            updated += 1;
        }

        Ok(updated)
    }

    pub fn find(&self, name: &str) -> Option<&ConnectionRecord> {
        self.records.iter().find(|record| record.name == name)
    }
}

fn write_synced(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(data).map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))
}

impl Deref for ConfigStore {
    type Target = [ConnectionRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}
