use crate::configuration::Settings;
use crate::error::{Error, Result};
use crate::mangadex::{
    get_chapter_group, get_chapter_images, get_manga_chapters, get_manga_name, GroupNameCache,
};
use crate::mangadex_client::{ApiClient, Transport};
use crate::models::naming::{chapter_folder_format, page_filename, sanitize_path_component};
use crate::models::Cli;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;
use uuid::Uuid;

/// Folder tag for chapters credited to no scanlation group.
const NO_GROUP: &str = "No Group";

#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    pub manga_id: Uuid,
    pub group: Option<Uuid>,
    pub chapter: Option<String>,
    pub extra: Option<String>,
}

impl From<&Cli> for DownloadRequest {
    fn from(cli: &Cli) -> Self {
        Self {
            manga_id: cli.manga_id,
            group: cli.group,
            chapter: cli.chapter.clone(),
            extra: cli.extra.clone(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub chapters: usize,
    pub pages_written: usize,
    pub pages_skipped: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// The requested chapter number isn't in the manga's listing.
    ChapterNotFound(String),
}

pub async fn run<T: Transport>(
    settings: &Settings,
    client: &ApiClient<T>,
    request: &DownloadRequest,
) -> anyhow::Result<RunOutcome> {
    let manga_name = get_manga_name(client, request.manga_id)
        .await?
        .ok_or(Error::MissingMangaName(request.manga_id))?;
    info!("Manga: {}", manga_name);

    let manga_path = settings
        .output_path()
        .join(sanitize_path_component(&manga_name));
    fs::create_dir_all(&manga_path).map_err(Error::io(&manga_path))?;

    let mut chapters = get_manga_chapters(client, request.manga_id, request.group).await?;

    if let Some(number) = &request.chapter {
        match chapters.only(number) {
            Some(single) => chapters = single,
            None => {
                warn!("Chapter {} is not in the chapter list", number);
                return Ok(RunOutcome::ChapterNotFound(number.clone()));
            }
        }
    }

    let mut groups = GroupNameCache::new();
    let mut summary = RunSummary::default();

    // Upstream lists newest first.
    for (number, chapter_id) in chapters.iter().rev() {
        let group_id = match request.group {
            Some(group) => Some(group),
            None => get_chapter_group(client, chapter_id).await?,
        };
        let group_name = match group_id {
            Some(id) => groups.get_or_fetch(client, id).await?,
            None => NO_GROUP.to_string(),
        };

        let folder = chapter_folder_format(
            &manga_name,
            number,
            &group_name,
            request.extra.as_deref(),
        );
        info!("Getting '{}'", folder);

        let chapter_path = manga_path.join(sanitize_path_component(&folder));
        fs::create_dir_all(&chapter_path).map_err(Error::io(&chapter_path))?;

        let images = get_chapter_images(client, chapter_id, settings.quality).await?;
        download_pages(client, &chapter_path, &images, &mut summary).await?;
        summary.chapters += 1;
    }

    info!("Finished!");
    Ok(RunOutcome::Completed(summary))
}

async fn download_pages<T: Transport>(
    client: &ApiClient<T>,
    chapter_path: &Path,
    images: &[Url],
    summary: &mut RunSummary,
) -> Result<()> {
    for (index, url) in images.iter().enumerate() {
        let source_name = url.path_segments().and_then(|s| s.last()).unwrap_or("");
        let page_path = chapter_path.join(page_filename(index, source_name));

        if page_path.exists() {
            debug!("{} exists, skipping", page_path.display());
            summary.pages_skipped += 1;
            continue;
        }

        debug!("Getting page #{}: {}", index, url);
        info!("Writing page \"{}\"", page_path.display());
        download_page(client, url, &page_path).await?;
        summary.pages_written += 1;
    }

    Ok(())
}

/// Streams into `<path>.part` first so an interrupted write never looks complete.
async fn download_page<T: Transport>(
    client: &ApiClient<T>,
    url: &Url,
    path: &Path,
) -> Result<()> {
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let written = client.download(url, &part).await?;
    debug!("{} bytes from {}", written, url);
    fs::rename(&part, path).map_err(Error::io(path))
}
