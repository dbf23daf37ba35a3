use anyhow::Context;
use shb::{ssh::SystemLauncher, App, Settings, EXIT_FAILURE};
use std::{
    ffi::OsString,
    io::{self, Write},
};

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run() -> anyhow::Result<i32> {
    let settings = Settings::from_env().context("Cannot proceed with setup")?;
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let mut app = App::new(settings, SystemLauncher);
    let mut out = io::stdout().lock();
    let code = app.run(&args, &mut out)?;
    out.flush()?;

    Ok(code)
}

fn main() {
    init_logging();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}. Exiting...", e);
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}
