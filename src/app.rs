use std::{ffi::OsString, io::Write};

use anyhow::Context;
use colored::Colorize;
use tracing::{debug, info};

use crate::{
    cli::{usage, Command},
    config::{Settings, CRATE_NAME},
    record::{ConnectionRecord, DEFAULT_IDENTITY, DEFAULT_PORT},
    ssh::{Launcher, SshInvocation},
    ConfigStore, Error,
};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub struct App<L: Launcher> {
    settings: Settings,
    launcher: L,
}

impl<L: Launcher> App<L> {
    pub fn new(settings: Settings, launcher: L) -> Self {
        App { settings, launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Runs one invocation. `args` excludes the program name; listings and
    /// help go to `out`, complaints to stderr. Returns the exit code.
    pub fn run<W: Write>(&mut self, args: &[OsString], out: &mut W) -> anyhow::Result<i32> {
        let command = match Command::parse(args) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                return Ok(EXIT_FAILURE);
            }
        };
        debug!("dispatching {:?}", command);

        let mut store = ConfigStore::open(&self.settings.config_path)
            .context("Error opening the config file")?;

        match command {
            Command::Add {
                name,
                target,
                identity,
            } => {
                match store.add(&name, &target, identity.as_deref()) {
                    Ok(record) => info!("added {} -> {}", record.name, record.destination()),
                    Err(
                        e @ (Error::InvalidFormat(_)
                        | Error::DuplicateName(_)
                        | Error::InvalidName(_)),
                    ) => return Ok(rejected(e)),
                    Err(e) => return Err(e.into()),
                }
                save(&store)?;
            }

            Command::Remove { name } => {
                let removed = store.remove(&name);
                info!("removed {} record(s) named {}", removed, name);
                save(&store)?;
            }

            Command::Edit { name, target } => {
                match store.edit(&name, &target) {
                    Ok(updated) => info!("updated {} record(s) named {}", updated, name),
                    Err(e @ Error::InvalidFormat(_)) => return Ok(rejected(e)),
                    Err(e) => return Err(e.into()),
                }
                save(&store)?;
            }

            Command::List { name } => match name {
                Some(name) => {
                    if let Some(record) = store.find(&name) {
                        write_record(out, record)?;
                    }
                }
                None => {
                    for record in store.iter() {
                        write_record(out, record)?;
                    }
                }
            },

            Command::Connect { name, extra } => {
                let Some(record) = store.find(&name) else {
                    eprintln!("Could not find {}. Exiting...", name);
                    return Ok(EXIT_FAILURE);
                };
                let invocation = SshInvocation::new(&self.settings, record, &extra);
                drop(store);

                return Ok(self.launcher.launch(&invocation)?);
            }

            Command::Help => write!(out, "{}", usage())?,
        }

        Ok(EXIT_OK)
    }
}

fn save(store: &ConfigStore) -> anyhow::Result<()> {
    store.save().context("Error writing to the config file")
}

fn rejected(e: Error) -> i32 {
    eprintln!("{}", e);
    eprintln!("\tType {CRATE_NAME} help for more information...");
    EXIT_FAILURE
}

/// Prints a record, leaving out port and identity when they are defaults.
pub fn write_record<W: Write>(out: &mut W, record: &ConnectionRecord) -> std::io::Result<()> {
    writeln!(out, "{}", record.name.bold())?;
    writeln!(out, "    username: {}", record.username)?;
    writeln!(out, "    domain:   {}", record.domain)?;
    if record.effective_port() != DEFAULT_PORT {
        writeln!(out, "    port:     {}", record.port)?;
    }
    if record.effective_identity() != DEFAULT_IDENTITY {
        writeln!(out, "    identity: {}", record.identity)?;
    }
    Ok(())
}
