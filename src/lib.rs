pub mod cli;
pub mod config;
pub mod docker;
pub mod dotfile;
pub mod exec;
pub mod log;
pub mod registry;
pub mod release;
