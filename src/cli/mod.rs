use std::path::PathBuf;

use miette::Result;

use crate::{config::Config, docker};

pub mod start;
pub mod status;
pub mod stop;
pub mod update;

#[derive(Debug, clap::Parser)]
#[clap(version, about)]
pub struct Args {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Start the workspace container
    Start(StartArgs),

    /// Show container status
    Status(StatusArgs),

    /// Stop the container
    Stop(StopArgs),

    /// Update the image only
    Update(UpdateArgs),
}

#[derive(Debug, clap::Parser)]
pub struct StartArgs {
    /// Directory to mount as the workspace, else the current directory
    #[clap(value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Dotfile in your $HOME to mount read-only in the container's $HOME
    #[clap(short, long = "dotfile", value_name = "DOTFILE")]
    pub dotfile: Vec<String>,

    /// Use IMAGE instead of the configured default
    #[clap(short, long, value_name = "IMAGE")]
    pub image: Option<String>,

    /// Skip the update checks
    #[clap(short, long)]
    pub fast: bool,
}

#[derive(Debug, clap::Parser)]
pub struct StatusArgs {}

#[derive(Debug, clap::Parser)]
pub struct StopArgs {}

#[derive(Debug, clap::Parser)]
pub struct UpdateArgs {
    /// Update IMAGE instead of the configured default
    #[clap(short, long, value_name = "IMAGE")]
    pub image: Option<String>,
}

/// Prints the container's port mappings and the IDE URL.
pub(crate) fn print_container_info(container: &str, config: &Config) -> Result<()> {
    println!("{}", docker::port_mappings(container)?);

    let endpoint = docker::port_endpoint(container, config.ide_port)?;
    println!("Running on http://{endpoint}/. Run `idebox stop` to stop.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn start_parses_directory_and_flags() {
        let args = Args::parse_from([
            "idebox", "start", "/tmp/proj", "-d", ".vimrc", "-d", ".gitconfig", "-f",
        ]);
        let Subcommand::Start(start) = args.subcommand else {
            panic!("expected start");
        };
        assert_eq!(start.directory, Some(PathBuf::from("/tmp/proj")));
        assert_eq!(start.dotfile, vec![".vimrc", ".gitconfig"]);
        assert!(start.fast);
        assert_eq!(start.image, None);
    }

    #[test]
    fn start_directory_defaults_to_none() {
        let args = Args::parse_from(["idebox", "start"]);
        let Subcommand::Start(start) = args.subcommand else {
            panic!("expected start");
        };
        assert_eq!(start.directory, None);
        assert!(!start.fast);
    }

    #[test]
    fn update_accepts_an_image_override() {
        let args = Args::parse_from(["idebox", "update", "-i", "acme/studio:beta"]);
        let Subcommand::Update(update) = args.subcommand else {
            panic!("expected update");
        };
        assert_eq!(update.image.as_deref(), Some("acme/studio:beta"));
    }

    #[test]
    fn status_and_stop_take_no_arguments() {
        assert!(matches!(
            Args::parse_from(["idebox", "status"]).subcommand,
            Subcommand::Status(_)
        ));
        assert!(matches!(
            Args::parse_from(["idebox", "stop"]).subcommand,
            Subcommand::Stop(_)
        ));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["idebox", "restart"]).is_err());
    }
}
