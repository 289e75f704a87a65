use std::{
    fs,
    path::{Path, PathBuf},
};

use miette::{bail, miette, Result};

use crate::{
    config::Config,
    docker::{self, LaunchSpec},
    dotfile, log, registry, release,
};

use super::{Args, StartArgs};

pub fn main(config: &Config, _args: &Args, start_args: &StartArgs) -> Result<()> {
    if !start_args.fast {
        release::print_upgrade_hint();
    }

    let raw_directory = start_args
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let workspace = resolve_workspace(&raw_directory)?;

    if let Some(container) = docker::labeled_containers()?.into_iter().next() {
        return super::print_container_info(&container, config);
    }

    let image = start_args
        .image
        .clone()
        .unwrap_or_else(|| config.image.clone());

    if !start_args.fast && registry::update(&image).is_err() {
        log!("Warning": "image update failed; starting with the local image");
    }

    let home = dirs::home_dir().ok_or_else(|| miette!("could not find home directory"))?;
    let dotfiles = start_args
        .dotfile
        .iter()
        .map(|raw| dotfile::resolve(&home, raw))
        .collect::<Result<Vec<_>>>()?;

    let spec = LaunchSpec {
        image,
        workspace,
        container_home: config.container_home.clone(),
        dotfiles,
        ports: config.publish_ports(),
    };

    let container = spec.launch()?;
    super::print_container_info(&container, config)
}

fn resolve_workspace(raw: &Path) -> Result<PathBuf> {
    match fs::canonicalize(raw) {
        Ok(path) if path.is_dir() => Ok(path),
        _ => bail!("{}: no such directory", raw.display()),
    }
}
