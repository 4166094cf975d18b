pub mod chapters;
pub mod images;
pub mod metadata;
pub mod schema;

pub use chapters::{get_manga_chapters, ChapterMap};
pub use images::get_chapter_images;
pub use metadata::{get_chapter_group, get_manga_name, GroupNameCache};

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T> {
    serde_json::from_value(body).map_err(|source| Error::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
