pub mod configuration;
pub mod error;
pub mod mangadex;
pub mod mangadex_client;
pub mod models;
pub mod run;

#[cfg(test)]
mod testing;

pub use configuration::Settings;
pub use error::{Error, Result};
pub use mangadex_client::ApiClient;
pub use models::Cli;
pub use run::{run, DownloadRequest, RunOutcome, RunSummary};
