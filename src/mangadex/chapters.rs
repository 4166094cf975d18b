use super::decode;
use super::schema::AggregateChapter;
use crate::error::Result;
use crate::mangadex_client::{ApiClient, Transport};
use log::debug;
use serde_json::Value;
use uuid::Uuid;

/// Chapter number to chapter id, in the order the upstream listed them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChapterMap {
    entries: Vec<(String, Uuid)>,
}

impl ChapterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated number takes the new id but keeps its original position.
    pub fn insert(&mut self, number: String, id: Uuid) {
        match self.entries.iter_mut().find(|(n, _)| *n == number) {
            Some(entry) => entry.1 = id,
            None => self.entries.push((number, id)),
        }
    }

    pub fn get(&self, number: &str) -> Option<Uuid> {
        self.entries
            .iter()
            .find(|(n, _)| n == number)
            .map(|(_, id)| *id)
    }

    /// Collapses the map to the single chapter `number`, or `None` if absent.
    pub fn only(&self, number: &str) -> Option<ChapterMap> {
        self.get(number).map(|id| ChapterMap {
            entries: vec![(number.to_string(), id)],
        })
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, Uuid)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens `manga/{id}/aggregate` into a single chapter listing.
///
/// Volume grouping is dropped. When `group` is given only that group's
/// chapters are requested.
pub async fn get_manga_chapters<T: Transport>(
    client: &ApiClient<T>,
    manga_id: Uuid,
    group: Option<Uuid>,
) -> Result<ChapterMap> {
    let endpoint = format!("manga/{}/aggregate", manga_id);
    let query: Vec<(String, String)> = group
        .into_iter()
        .map(|g| ("groups[]".to_string(), g.to_string()))
        .collect();
    let body = client.get(&endpoint, &query).await?;

    let mut chapters = ChapterMap::new();
    for volume in members(&body["volumes"]) {
        for chapter in members(&volume["chapters"]) {
            let chapter: AggregateChapter = decode(&endpoint, chapter.clone())?;
            chapters.insert(chapter.chapter, chapter.id);
        }
    }

    debug!("Manga {} has {} chapters", manga_id, chapters.len());
    Ok(chapters)
}

// Empty collections come back as `[]` rather than `{}`.
fn members(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        _ => Box::new(std::iter::empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use uuid::uuid;

    const MANGA: Uuid = uuid!("69060a67-1d4e-4110-9d29-838bfd99917f");
    const GROUP: Uuid = uuid!("b77668ed-0810-4327-9684-46ca371e370e");
    const C1: Uuid = uuid!("00000000-0000-4000-8000-000000000001");
    const C2: Uuid = uuid!("00000000-0000-4000-8000-000000000002");
    const C3: Uuid = uuid!("00000000-0000-4000-8000-000000000003");

    fn aggregate_body() -> String {
        format!(
            r#"{{"result":"ok","volumes":{{
                "2":{{"volume":"2","count":2,"chapters":{{
                    "10":{{"chapter":"10","id":"{c3}","others":[],"count":1}},
                    "9.5":{{"chapter":"9.5","id":"{c2}","others":[],"count":1}}
                }}}},
                "1":{{"volume":"1","count":1,"chapters":{{
                    "1":{{"chapter":"1","id":"{c1}","others":[],"count":1}}
                }}}}
            }}}}"#,
            c1 = C1,
            c2 = C2,
            c3 = C3
        )
    }

    #[tokio::test]
    async fn volumes_are_flattened_in_order() {
        let client = FakeTransport::new()
            .respond(&format!("manga/{}/aggregate", MANGA), 200, &aggregate_body())
            .client();

        let chapters = get_manga_chapters(&client, MANGA, None).await.unwrap();
        let listed: Vec<_> = chapters.iter().collect();

        assert_eq!(vec![("10", C3), ("9.5", C2), ("1", C1)], listed);
        assert_eq!(vec![Vec::<(String, String)>::new()], client.transport().queries());
    }

    #[tokio::test]
    async fn group_filter_is_sent_as_array_param() {
        let client = FakeTransport::new()
            .respond(&format!("manga/{}/aggregate", MANGA), 200, &aggregate_body())
            .client();

        get_manga_chapters(&client, MANGA, Some(GROUP)).await.unwrap();

        assert_eq!(
            vec![vec![("groups[]".to_string(), GROUP.to_string())]],
            client.transport().queries()
        );
    }

    #[tokio::test]
    async fn empty_volumes_array() {
        let client = FakeTransport::new()
            .respond(
                &format!("manga/{}/aggregate", MANGA),
                200,
                r#"{"result":"ok","volumes":[]}"#,
            )
            .client();

        let chapters = get_manga_chapters(&client, MANGA, None).await.unwrap();
        assert!(chapters.is_empty());
    }

    #[test]
    fn duplicate_number_keeps_position() {
        let mut map = ChapterMap::new();
        map.insert("1".into(), C1);
        map.insert("2".into(), C2);
        map.insert("1".into(), C3);

        let listed: Vec<_> = map.iter().collect();
        assert_eq!(vec![("1", C3), ("2", C2)], listed);
    }

    #[test]
    fn only_collapses_to_one_chapter() {
        let mut map = ChapterMap::new();
        map.insert("1".into(), C1);
        map.insert("2".into(), C2);

        let single = map.only("2").unwrap();
        assert_eq!(1, single.len());
        assert_eq!(Some(C2), single.get("2"));
        assert!(map.only("3").is_none());
    }
}
