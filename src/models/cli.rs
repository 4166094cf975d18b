use clap::Parser;
use uuid::Uuid;

/// Download manga chapters from MangaDex
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// MangaDex id of the manga
    pub manga_id: Uuid,

    /// Only download chapters from specified group
    #[arg(short, long, value_name = "GID")]
    pub group: Option<Uuid>,

    /// Only download specified chapter number
    #[arg(short, long, value_name = "NUM")]
    pub chapter: Option<String>,

    /// Extra information to be added in folder names
    #[arg(short, long)]
    pub extra: Option<String>,

    #[arg(short = 'C', long, default_value = "mangadex-dl")]
    pub config_file: String,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
