//! Argument schema for the `shb` command line.
//!
//! ```text
//! shb add <name> <username>@<domain>[:<port>] [<identity>]
//! shb remove <name>
//! shb edit <name> <username>@<domain>[:<port>]
//! shb ls [<name>]
//! shb help
//! shb <name> [ssh args...]
//! ```

use std::{ffi::OsString, fmt};

use crate::config::CRATE_NAME;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add {
        name: String,
        target: String,
        identity: Option<String>,
    },
    Remove {
        name: String,
    },
    Edit {
        name: String,
        target: String,
    },
    List {
        name: Option<String>,
    },
    Help,
    Connect {
        name: String,
        extra: Vec<OsString>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Add,
    Remove,
    Edit,
    List,
}

impl Kind {
    fn format(self) -> &'static str {
        match self {
            Kind::Add => "add <name> <username>@<domain>[:<port>] [<identity>]",
            Kind::Remove => "remove <name>",
            Kind::Edit => "edit <name> <username>@<domain>[:<port>]",
            Kind::List => "ls [<name>]",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    MissingCommand,
    Arity(Kind),
    NotUnicode(OsString),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingCommand => {
                write!(f, "No operation given.\n\tFormat: {CRATE_NAME} <name>")?
            }
            UsageError::Arity(kind) => write!(
                f,
                "Invalid operation.\n\tFormat: {CRATE_NAME} {}",
                kind.format()
            )?,
            UsageError::NotUnicode(arg) => write!(f, "Argument {:?} is not valid UTF-8.", arg)?,
        }
        write!(f, "\n\tType {CRATE_NAME} help for more information...")
    }
}

impl std::error::Error for UsageError {}

impl Command {
    /// Validates `args` (program name excluded) against the schema. Only the
    /// arguments forwarded to ssh may be non-UTF-8.
    pub fn parse(args: &[OsString]) -> Result<Self, UsageError> {
        let (first, rest) = args.split_first().ok_or(UsageError::MissingCommand)?;

        let command = match (text(first)?.as_str(), rest) {
            ("add", [name, target]) => Command::Add {
                name: text(name)?,
                target: text(target)?,
                identity: None,
            },
            ("add", [name, target, identity]) => Command::Add {
                name: text(name)?,
                target: text(target)?,
                identity: Some(text(identity)?),
            },
            ("add", _) => return Err(UsageError::Arity(Kind::Add)),

            ("remove", [name]) => Command::Remove { name: text(name)? },
            ("remove", _) => return Err(UsageError::Arity(Kind::Remove)),

            ("edit", [name, target]) => Command::Edit {
                name: text(name)?,
                target: text(target)?,
            },
            ("edit", _) => return Err(UsageError::Arity(Kind::Edit)),

            ("ls", []) => Command::List { name: None },
            ("ls", [name]) => Command::List {
                name: Some(text(name)?),
            },
            ("ls", _) => return Err(UsageError::Arity(Kind::List)),

            ("help" | "-h" | "--help", _) => Command::Help,

            (name, extra) => Command::Connect {
                name: name.to_string(),
                extra: extra.to_vec(),
            },
        };

        Ok(command)
    }
}

fn text(arg: &OsString) -> Result<String, UsageError> {
    arg.to_str()
        .map(str::to_string)
        .ok_or_else(|| UsageError::NotUnicode(arg.clone()))
}

pub fn usage() -> String {
    format!(
        "\
{CRATE_NAME} - SSH bookmarks

Usage:
    {CRATE_NAME} add <name> <username>@<domain>[:<port>] [<identity>]
        Save a connection. Port defaults to 22, identity to id_rsa
        (a key file name under ~/.ssh/).
    {CRATE_NAME} remove <name>
        Forget a connection.
    {CRATE_NAME} edit <name> <username>@<domain>[:<port>]
        Change where a connection points. The identity is kept.
    {CRATE_NAME} ls [<name>]
        Show one or all saved connections.
    {CRATE_NAME} help
        Show this message.
    {CRATE_NAME} <name> [ssh args...]
        Connect. Extra arguments are passed to ssh as-is.
"
    )
}
