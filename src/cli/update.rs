use miette::Result;

use crate::{config::Config, registry};

use super::{Args, UpdateArgs};

pub fn main(config: &Config, _args: &Args, update_args: &UpdateArgs) -> Result<()> {
    let image = update_args
        .image
        .clone()
        .unwrap_or_else(|| config.image.clone());

    registry::update(&image)?;
    println!("Updated {image}");

    Ok(())
}
