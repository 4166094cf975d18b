use super::decode;
use super::schema::AtHomeServer;
use crate::configuration::Quality;
use crate::error::{Error, Result};
use crate::mangadex_client::{ApiClient, Transport};
use url::Url;
use uuid::Uuid;

/// Page image URLs for `chapter_id`, in page order.
pub async fn get_chapter_images<T: Transport>(
    client: &ApiClient<T>,
    chapter_id: Uuid,
    quality: Quality,
) -> Result<Vec<Url>> {
    let endpoint = format!("at-home/server/{}", chapter_id);
    let body = client.get(&endpoint, &[]).await?;
    let at_home: AtHomeServer = decode(&endpoint, body)?;

    let files = match quality {
        Quality::Data => &at_home.chapter.data,
        Quality::DataSaver => &at_home.chapter.data_saver,
    };

    files
        .iter()
        .map(|file| {
            let url = [
                at_home.base_url.trim_end_matches('/'),
                quality.path_segment(),
                at_home.chapter.hash.as_str(),
                file.as_str(),
            ]
            .join("/");
            Url::parse(&url).map_err(Error::InvalidUrl)
        })
        .collect()
}
