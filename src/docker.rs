use std::{io, path::PathBuf, time::Duration};

use itertools::Itertools;
use miette::{miette, Result, WrapErr};

use crate::{
    dotfile::DotfileMount,
    exec::{self, Completion},
    log,
};

/// Label attached to the workspace container so later invocations can find
/// it again.
pub const LABEL: &str = "idebox";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonStatus {
    Ready,
    NotInstalled,
    NotRunning,
    NotResponding,
}

/// Probes `docker info`, giving the daemon `timeout` to answer.
pub fn daemon_status(timeout: Duration) -> DaemonStatus {
    match exec::silent_with_timeout(&["docker", "info"], timeout) {
        Ok(Completion::Success) => DaemonStatus::Ready,
        Ok(Completion::Failure) => DaemonStatus::NotRunning,
        Ok(Completion::TimedOut) => DaemonStatus::NotResponding,
        Err(e) if e.kind() == io::ErrorKind::NotFound => DaemonStatus::NotInstalled,
        Err(_) => DaemonStatus::NotRunning,
    }
}

/// IDs of all containers (running or not) carrying [`LABEL`]. At most one is
/// expected, but every ID is returned so `stop` can clean up strays.
pub fn labeled_containers() -> Result<Vec<String>> {
    let filter = format!("label={LABEL}");
    let out = exec::capturing_stdout(&[
        "docker",
        "ps",
        "--all",
        "--filter",
        filter.as_str(),
        "--format",
        "{{.ID}}",
    ])
    .wrap_err("failed to list containers")?;

    Ok(split_lines(&out))
}

pub fn stop(container: &str) -> Result<()> {
    exec::silent(&["docker", "stop", container]).wrap_err("failed to stop container")
}

/// All port mappings of `container`, as `docker port` prints them.
pub fn port_mappings(container: &str) -> Result<String> {
    let out = exec::capturing_stdout(&["docker", "port", container])?;
    Ok(out.trim_end().to_string())
}

/// Host endpoint (`host:port`) that `container_port` is published on.
pub fn port_endpoint(container: &str, container_port: u16) -> Result<String> {
    let port = container_port.to_string();
    let out = exec::capturing_stdout(&["docker", "port", container, port.as_str()])?;

    // docker may list both an IPv4 and an IPv6 endpoint; the first suffices
    split_lines(&out)
        .into_iter()
        .next()
        .ok_or_else(|| miette!("port {container_port} is not published"))
}

/// Digest reference (`repository@sha256:...`) of the locally cached image.
pub fn local_digest(image: &str) -> Result<String> {
    let out = exec::capturing_stdout(&[
        "docker",
        "inspect",
        "--format",
        "{{index .RepoDigests 0}}",
        image,
    ])?;
    Ok(out.trim().to_string())
}

pub fn pull(image: &str) -> Result<()> {
    exec::exec(&["docker", "pull", image]).wrap_err_with(|| format!("failed to pull {image}"))
}

fn split_lines(out: &str) -> Vec<String> {
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Publish {
    Fixed,
    All,
}

/// Everything needed to `docker run` the workspace container.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub image: String,
    pub workspace: PathBuf,
    pub container_home: String,
    pub dotfiles: Vec<DotfileMount>,
    pub ports: Vec<u16>,
}

impl LaunchSpec {
    fn run_args(&self, publish: Publish) -> Vec<String> {
        let mut args = [
            "docker",
            "run",
            "--detach",
            "--rm",
            "--label",
            LABEL,
            "--env",
            "IDE_HOSTNAME=0.0.0.0",
            "--security-opt",
            "seccomp=unconfined",
        ]
        .iter()
        .map(ToString::to_string)
        .collect_vec();

        args.push("--volume".to_string());
        args.push(format!(
            "{}:{}/workspace",
            self.workspace.display(),
            self.container_home
        ));

        for dotfile in &self.dotfiles {
            args.push("--volume".to_string());
            args.push(dotfile.volume_arg(&self.container_home));
        }

        match publish {
            Publish::Fixed => {
                for port in &self.ports {
                    args.push(format!("--publish={port}:{port}"));
                }
            }
            Publish::All => args.push("--publish-all".to_string()),
        }

        args.push(self.image.clone());
        args
    }

    /// Launches the container and returns its ID. Tries the fixed host
    /// ports first; if any of them is unavailable, retries with every
    /// exposed port published to a random host port.
    pub fn launch(&self) -> Result<String> {
        let out = match exec::capturing_stdout(&self.run_args(Publish::Fixed)) {
            Ok(out) => out,
            Err(_) => {
                log!("Retrying" ("publish-all"): "fixed ports unavailable");
                exec::capturing_stdout(&self.run_args(Publish::All))
                    .map_err(|_| miette!("failed to start container"))?
            }
        };

        Ok(out.trim().to_string())
    }
}
