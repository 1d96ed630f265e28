use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod engine;
pub mod http;
pub mod upstream;
pub mod views;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
