use std::{
    ffi::OsString,
    process::{Command, ExitStatus, Stdio},
};

use tracing::debug;

use crate::{config::Settings, record::ConnectionRecord, Error, Result};

/// A fully built `ssh` command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SshInvocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl SshInvocation {
    /// `ssh -i <ssh_dir>/<identity> -p <port> <username>@<domain> [extra...]`
    pub fn new(settings: &Settings, record: &ConnectionRecord, extra: &[OsString]) -> Self {
        let mut args: Vec<OsString> = vec![
            "-i".into(),
            settings.identity_path(record.effective_identity()).into(),
            "-p".into(),
            record.effective_port().into(),
            record.destination().into(),
        ];
        args.extend(extra.iter().cloned());

        SshInvocation {
            program: settings.ssh_program.clone().into(),
            args,
        }
    }
}

/// Runs an invocation to completion and reports its exit code.
pub trait Launcher {
    fn launch(&mut self, invocation: &SshInvocation) -> Result<i32>;
}

/// Spawns the real ssh with the terminal attached.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, invocation: &SshInvocation) -> Result<i32> {
        debug!("running {:?} {:?}", invocation.program, invocation.args);

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(Error::Launch)?;

        debug!("ssh exited with {}", status);
        Ok(exit_code(status))
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ConnectionRecord {
        ConnectionRecord {
            name: "box".into(),
            domain: "h".into(),
            username: "u".into(),
            identity: "id_rsa".into(),
            port: "22".into(),
        }
    }

    fn args(invocation: &SshInvocation) -> Vec<String> {
        invocation
            .args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn builds_identity_port_and_destination() {
        let settings = Settings::with_home("/home/me");
        let invocation = SshInvocation::new(&settings, &record(), &[]);

        assert_eq!(invocation.program, "ssh");
        assert_eq!(args(&invocation), ["-i", "/home/me/.ssh/id_rsa", "-p", "22", "u@h"]);
    }

    #[test]
    fn extra_args_follow_destination() {
        let settings = Settings::with_home("/home/me");
        let extra = vec![OsString::from("-t"), OsString::from("tmux attach")];
        let invocation = SshInvocation::new(&settings, &record(), &extra);

        assert_eq!(&args(&invocation)[4..], ["u@h", "-t", "tmux attach"]);
    }

    #[test]
    fn legacy_record_uses_defaults() {
        let settings = Settings::with_home("/home/me");
        let legacy = ConnectionRecord {
            identity: String::new(),
            port: String::new(),
            ..record()
        };
        let invocation = SshInvocation::new(&settings, &legacy, &[]);

        assert_eq!(args(&invocation), ["-i", "/home/me/.ssh/id_rsa", "-p", "22", "u@h"]);
    }

    #[cfg(unix)]
    #[test]
    fn system_launcher_reports_exit_code() {
        let invocation = SshInvocation {
            program: "sh".into(),
            args: vec!["-c".into(), "exit 3".into()],
        };
        assert_eq!(SystemLauncher.launch(&invocation).unwrap(), 3);
    }

    #[test]
    fn system_launcher_reports_missing_binary() {
        let invocation = SshInvocation {
            program: "shb-no-such-program".into(),
            args: Vec::new(),
        };
        assert!(matches!(SystemLauncher.launch(&invocation), Err(Error::Launch(_))));
    }
}
