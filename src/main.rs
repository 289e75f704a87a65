use std::time::Duration;

use clap::Parser;
use idebox::{
    cli::{start, status, stop, update, Args, Subcommand},
    config::Config,
    docker::{self, DaemonStatus},
};
use miette::{bail, Result};

const DAEMON_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    let args = Args::parse();

    check_docker()?;

    let config = Config::load_config()?;
    match &args.subcommand {
        Subcommand::Start(start_args) => start::main(&config, &args, start_args),
        Subcommand::Status(status_args) => status::main(&config, &args, status_args),
        Subcommand::Stop(stop_args) => stop::main(&args, stop_args),
        Subcommand::Update(update_args) => update::main(&config, &args, update_args),
    }
}

fn check_docker() -> Result<()> {
    match docker::daemon_status(DAEMON_TIMEOUT) {
        DaemonStatus::Ready => Ok(()),
        DaemonStatus::NotInstalled => bail!(
            help = "install Docker Desktop or the docker engine first",
            "Docker is not installed",
        ),
        DaemonStatus::NotRunning => bail!(
            help = "start the Docker daemon, then try again",
            "Docker is not running",
        ),
        DaemonStatus::NotResponding => bail!(
            help = "the daemon did not answer within 10 seconds; restart it and try again",
            "Docker is not responding",
        ),
    }
}
