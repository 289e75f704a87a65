use miette::Result;

use crate::{config::Config, docker};

use super::{Args, StatusArgs};

pub fn main(config: &Config, _args: &Args, _status_args: &StatusArgs) -> Result<()> {
    match docker::labeled_containers()?.into_iter().next() {
        Some(container) => super::print_container_info(&container, config),
        None => {
            println!("No containers are running");
            Ok(())
        }
    }
}
