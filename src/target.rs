use std::str::FromStr;

use crate::{record::DEFAULT_PORT, Error};

/// Parsed form of a `<username>@<domain>[:<port>]` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub username: String,
    pub domain: String,
    pub port: String,
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFormat(s.to_string());

        // first '@' separates the user, first ':' after it the port
        let (username, rest) = s.split_once('@').ok_or_else(invalid)?;
        let (domain, port) = match rest.split_once(':') {
            Some((domain, port)) => (domain, port),
            None => (rest, DEFAULT_PORT),
        };

        if username.is_empty() || domain.is_empty() || port.parse::<u16>().is_err() {
            return Err(invalid());
        }

        Ok(Target {
            username: username.to_string(),
            domain: domain.to_string(),
            port: port.to_string(),
        })
    }
}
