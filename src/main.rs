pub mod cli;
pub mod decl;
pub mod emit;
pub mod error;
pub mod mapper;
pub mod name;
pub mod postprocess;
pub mod schema;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
