#[macro_use] extern crate clap;
#[macro_use] extern crate lazy_static;

pub mod demos;
pub mod graphics;
pub mod interface;

use std::process;

use env_logger::Env;
use log::error;

use interface::cli::cli_main;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = cli_main() {
        error!("{:#}", e);
        process::exit(-1);
    }
}
