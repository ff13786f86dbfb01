use crate::constants::{ARCHIVE_LINK_SELECTOR, LISTING_BASE_URL, MAX_PAGE};
use crate::errors::AppResult;
use crate::models::TargetPeriod;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info};
use url::Url;

/// Cached structural selector for archive post headings.
/// Compiled once at initialization for performance.
static ARCHIVE_SELECTOR: OnceLock<Selector> = OnceLock::new();

fn archive_selector() -> &'static Selector {
    ARCHIVE_SELECTOR.get_or_init(|| {
        Selector::parse(ARCHIVE_LINK_SELECTOR)
            .expect("ARCHIVE_LINK_SELECTOR is a valid CSS selector")
    })
}

/// Scans the paginated tag archive for the requested month's post.
///
/// Listing pages are fetched in index order (`0..MAX_PAGE`) and the first
/// anchor whose href contains the period's `{monthname}-{year}` token wins;
/// no further pages are fetched once a match is found. Exhausting all pages
/// without a match returns `Ok(None)`; absence is an expected outcome.
///
/// # Errors
///
/// Returns an error if a listing page request fails or comes back with a
/// non-success status. Transport failures are not retried; they abort the
/// scan.
pub async fn locate(
    client: &reqwest::Client,
    period: &TargetPeriod,
) -> AppResult<Option<String>> {
    let token = period.archive_token();
    info!(token = token.as_str(), "Scanning listing pages for archive post");

    for index in 0..MAX_PAGE {
        let page_url = Url::parse(&format!("{LISTING_BASE_URL}/page/{index}/"))?;
        debug!(page = index, url = %page_url, "Fetching listing page");

        let body = client
            .get(page_url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if let Some(archive_url) = find_archive_link(&body, &token, &page_url) {
            info!(page = index, url = archive_url.as_str(), "Archive post found");
            return Ok(Some(archive_url));
        }
    }

    info!(
        token = token.as_str(),
        pages_scanned = MAX_PAGE,
        "No archive post found"
    );
    Ok(None)
}

/// Returns the first `article > h2 > a` href containing `token`, resolved
/// to an absolute URL against `base_url`.
///
/// Document order decides ties; anchors outside an article heading never
/// match, however promising their href looks.
pub fn find_archive_link(html: &str, token: &str, base_url: &Url) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(archive_selector())
        .filter_map(|el| el.value().attr("href"))
        .find(|href| href.contains(token))
        .and_then(|href| base_url.join(href).ok())
        .map(|url| url.to_string())
}
