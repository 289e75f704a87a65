use miette::Result;

use crate::docker;

use super::{Args, StopArgs};

pub fn main(_args: &Args, _stop_args: &StopArgs) -> Result<()> {
    for container in docker::labeled_containers()? {
        docker::stop(&container)?;
    }

    println!("Stopped");
    Ok(())
}
