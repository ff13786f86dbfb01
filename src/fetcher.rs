use crate::constants::{EXT_REGEX_PATTERN, WALLPAPER_LINK_SELECTOR};
use crate::errors::{AppError, AppResult};
use crate::models::CalendarMode;
use regex::Regex;
use scraper::{Html, Selector};
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

/// Cached regex for the image extension filter.
/// Compiled once at initialization for performance.
static EXT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Cached selector for download links inside the archive post's lists.
static WALLPAPER_SELECTOR: OnceLock<Selector> = OnceLock::new();

fn ext_regex() -> &'static Regex {
    EXT_REGEX.get_or_init(|| {
        Regex::new(EXT_REGEX_PATTERN).expect("EXT_REGEX_PATTERN is a valid regex pattern")
    })
}

fn wallpaper_selector() -> &'static Selector {
    WALLPAPER_SELECTOR.get_or_init(|| {
        Selector::parse(WALLPAPER_LINK_SELECTOR)
            .expect("WALLPAPER_LINK_SELECTOR is a valid CSS selector")
    })
}

/// Downloads every matching wallpaper from an archive post into `download_dir`.
///
/// The post is fetched once, its `li > a` links are filtered by extension,
/// calendar variant and resolution, and the survivors are downloaded one at
/// a time in document order. Existing files are overwritten. One progress
/// line per written file goes to stdout.
///
/// # Arguments
///
/// * `client` - HTTP client to use for the requests
/// * `archive_url` - URL of the month's archive post (from the locator)
/// * `download_dir` - directory the images are written into (must exist)
/// * `resolution` - resolution token matched verbatim against hrefs, e.g. `1920x1080`
/// * `mode` - which calendar variant to keep
///
/// # Returns
///
/// The number of files written.
///
/// # Errors
///
/// Returns an error if the page fetch, an image fetch, or a file write
/// fails. Nothing is retried and no record of earlier successes is kept.
pub async fn download_wallpapers(
    client: &reqwest::Client,
    archive_url: &str,
    download_dir: &Path,
    resolution: &str,
    mode: CalendarMode,
) -> AppResult<usize> {
    let base_url = Url::parse(archive_url)?;

    let body = client
        .get(base_url.as_str())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let links = collect_wallpaper_links(&body, &base_url, resolution, mode);
    info!(
        candidates = links.len(),
        resolution = resolution,
        "Filtered wallpaper links"
    );

    let mut downloaded = 0;
    for url in &links {
        let filename = basename(url)
            .ok_or_else(|| AppError::UrlError(format!("no file name in {url}")))?;
        let file_path = download_dir.join(&filename);
        download_file(client, url, &file_path).await?;
        println!("Successfully downloaded {filename}");
        downloaded += 1;
    }

    Ok(downloaded)
}

/// Extracts the download links for one variant/resolution from an archive
/// post, in document order.
///
/// A href survives only when all three checks pass: it ends in an image
/// extension, it contains the variant's path segment, and it contains the
/// resolution token verbatim. Checks run against the raw href text; the
/// survivor is then resolved against `base_url` for fetching.
pub fn collect_wallpaper_links(
    html: &str,
    base_url: &Url,
    resolution: &str,
    mode: CalendarMode,
) -> Vec<Url> {
    let document = Html::parse_document(html);

    document
        .select(wallpaper_selector())
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| ext_regex().is_match(href))
        .filter(|href| href.contains(mode.dir_segment()))
        .filter(|href| href.contains(resolution))
        .filter_map(|href| base_url.join(href).ok())
        .collect()
}

/// Last path segment of the URL, used as the local filename.
fn basename(url: &Url) -> Option<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Fetches one image and writes it to `file_path`, truncating any existing
/// file. The body is streamed chunk by chunk rather than buffered whole.
async fn download_file(client: &reqwest::Client, url: &Url, file_path: &Path) -> AppResult<()> {
    debug!(url = %url, path = %file_path.display(), "Downloading wallpaper");

    let mut response = client
        .get(url.as_str())
        .send()
        .await?
        .error_for_status()
        .map_err(|e| AppError::NetworkError(format!("Failed to download {url}: {e}")))?;

    let mut file = File::create(file_path).await.map_err(|e| {
        AppError::IoError(format!("Failed to create {}: {}", file_path.display(), e))
    })?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(|e| {
            AppError::IoError(format!("Failed to write {}: {}", file_path.display(), e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{basename, collect_wallpaper_links};
    use crate::models::CalendarMode;
    use url::Url;

    fn base() -> Url {
        Url::parse("https://www.smashingmagazine.com/2016/09/wallpapers-october-2016/")
            .expect("base url")
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let html = r#"
            <html><body><ul>
              <li><a href="https://files.example.com/oct/cal/a-1920x1080.jpg">a</a></li>
              <li><a href="https://files.example.com/oct/nocal/b-1920x1080.png">b</a></li>
              <li><a href="https://files.example.com/oct/cal/c-1280x720.jpg">c</a></li>
              <li><a href="https://files.example.com/oct/cal/d-1920x1080.txt">d</a></li>
            </ul></body></html>
        "#;

        let links =
            collect_wallpaper_links(html, &base(), "1920x1080", CalendarMode::WithCalendar);
        let hrefs: Vec<&str> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            hrefs,
            vec!["https://files.example.com/oct/cal/a-1920x1080.jpg"]
        );
    }

    #[test]
    fn test_nocal_mode_selects_the_other_variant() {
        let html = r#"
            <html><body><ul>
              <li><a href="https://files.example.com/oct/cal/a-1920x1080.jpg">a</a></li>
              <li><a href="https://files.example.com/oct/nocal/b-1920x1080.png">b</a></li>
            </ul></body></html>
        "#;

        let links =
            collect_wallpaper_links(html, &base(), "1920x1080", CalendarMode::WithoutCalendar);
        assert_eq!(links.len(), 1);
        assert!(links[0].as_str().contains("/nocal/"));
    }

    #[test]
    fn test_document_order_is_preserved() {
        let html = r#"
            <html><body><ul>
              <li><a href="https://files.example.com/cal/z-1920x1080.jpg">z</a></li>
              <li><a href="https://files.example.com/cal/a-1920x1080.jpg">a</a></li>
            </ul></body></html>
        "#;

        let links =
            collect_wallpaper_links(html, &base(), "1920x1080", CalendarMode::WithCalendar);
        let names: Vec<&str> = links.iter().filter_map(|u| u.path().rsplit('/').next()).collect();
        assert_eq!(names, vec!["z-1920x1080.jpg", "a-1920x1080.jpg"]);
    }

    #[test]
    fn test_anchors_outside_list_items_are_ignored() {
        let html = r#"
            <html><body>
              <p><a href="https://files.example.com/cal/a-1920x1080.jpg">loose</a></p>
              <ul><li><a href="https://files.example.com/cal/b-1920x1080.jpg">listed</a></li></ul>
            </body></html>
        "#;

        let links =
            collect_wallpaper_links(html, &base(), "1920x1080", CalendarMode::WithCalendar);
        assert_eq!(links.len(), 1);
        assert!(links[0].as_str().ends_with("b-1920x1080.jpg"));
    }

    #[test]
    fn test_extension_check_is_case_sensitive() {
        // Uppercase extensions do not match.
        let html = r#"
            <html><body><ul>
              <li><a href="https://files.example.com/cal/a-1920x1080.JPG">upper</a></li>
              <li><a href="https://files.example.com/cal/b-1920x1080.jpeg">lower</a></li>
            </ul></body></html>
        "#;

        let links =
            collect_wallpaper_links(html, &base(), "1920x1080", CalendarMode::WithCalendar);
        assert_eq!(links.len(), 1);
        assert!(links[0].as_str().ends_with(".jpeg"));
    }

    #[test]
    fn test_extension_must_be_trailing() {
        let html = r#"
            <html><body><ul>
              <li><a href="https://files.example.com/cal/a-1920x1080.jpg.html">not image</a></li>
            </ul></body></html>
        "#;

        let links =
            collect_wallpaper_links(html, &base(), "1920x1080", CalendarMode::WithCalendar);
        assert!(links.is_empty());
    }

    #[test]
    fn test_relative_hrefs_resolve_against_page_url() {
        let html = r#"
            <html><body><ul>
              <li><a href="/files/cal/a-1920x1080.gif">rel</a></li>
            </ul></body></html>
        "#;

        let links =
            collect_wallpaper_links(html, &base(), "1920x1080", CalendarMode::WithCalendar);
        assert_eq!(
            links[0].as_str(),
            "https://www.smashingmagazine.com/files/cal/a-1920x1080.gif"
        );
    }

    #[test]
    fn test_basename_takes_last_path_segment() {
        let url =
            Url::parse("https://cdn.example.com/path/to/image-1920x1080-cal.jpg").unwrap();
        assert_eq!(basename(&url).as_deref(), Some("image-1920x1080-cal.jpg"));
    }

    #[test]
    fn test_basename_rejects_trailing_slash() {
        let url = Url::parse("https://cdn.example.com/path/to/").unwrap();
        assert_eq!(basename(&url), None);
    }
}
