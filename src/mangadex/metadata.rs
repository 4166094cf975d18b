use super::decode;
use super::schema::{EntityResponse, GroupAttributes, MangaAttributes};
use crate::error::Result;
use crate::mangadex_client::{ApiClient, Transport};
use log::debug;
use serde::de::IgnoredAny;
use std::collections::HashMap;
use uuid::Uuid;

/// Locale tag of the romanized Japanese title.
const ROMANIZED_LOCALE: &str = "ja-ro";
const GROUP_RELATIONSHIP: &str = "scanlation_group";

/// Returns the manga's romanized alternate title, if it has one.
pub async fn get_manga_name<T: Transport>(
    client: &ApiClient<T>,
    manga_id: Uuid,
) -> Result<Option<String>> {
    let endpoint = format!("manga/{}", manga_id);
    let body = client.get(&endpoint, &[]).await?;
    let manga: EntityResponse<MangaAttributes> = decode(&endpoint, body)?;

    Ok(manga
        .data
        .attributes
        .alt_titles
        .into_iter()
        .find_map(|mut title| title.remove(ROMANIZED_LOCALE)))
}

/// Returns the first scanlation group credited on `chapter_id`.
pub async fn get_chapter_group<T: Transport>(
    client: &ApiClient<T>,
    chapter_id: Uuid,
) -> Result<Option<Uuid>> {
    let endpoint = format!("chapter/{}", chapter_id);
    let body = client.get(&endpoint, &[]).await?;
    let chapter: EntityResponse<IgnoredAny> = decode(&endpoint, body)?;

    Ok(chapter
        .data
        .relationships
        .into_iter()
        .find(|rel| rel.kind == GROUP_RELATIONSHIP)
        .map(|rel| rel.id))
}

/// Group display names, looked up at most once per id for the life of a run.
#[derive(Debug, Default)]
pub struct GroupNameCache {
    names: HashMap<Uuid, String>,
}

impl GroupNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        group_id: Uuid,
    ) -> Result<String> {
        if let Some(name) = self.names.get(&group_id) {
            debug!("Group {} cached as {}", group_id, name);
            return Ok(name.clone());
        }

        let endpoint = format!("group/{}", group_id);
        let body = client.get(&endpoint, &[]).await?;
        let group: EntityResponse<GroupAttributes> = decode(&endpoint, body)?;

        let name = group.data.attributes.name;
        self.names.insert(group_id, name.clone());
        Ok(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
