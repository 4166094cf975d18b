pub mod cli;
pub mod naming;

pub use cli::Cli;
