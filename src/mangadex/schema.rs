//! Slices of the MangaDex v5 responses this tool reads.

use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Deserialize, Debug)]
pub struct EntityResponse<A> {
    pub data: Entity<A>,
}

#[derive(Deserialize, Debug)]
pub struct Entity<A> {
    pub id: Uuid,
    pub attributes: A,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MangaAttributes {
    #[serde(default)]
    pub alt_titles: Vec<HashMap<String, String>>,
}

#[derive(Deserialize, Debug)]
pub struct GroupAttributes {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct Relationship {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize, Debug)]
pub struct AggregateChapter {
    pub chapter: String,
    pub id: Uuid,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeServer {
    pub base_url: String,
    pub chapter: AtHomeChapter,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeChapter {
    pub hash: String,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub data_saver: Vec<String>,
}
