// Tag archive holding the monthly wallpaper posts
pub const LISTING_BASE_URL: &str = "https://www.smashingmagazine.com/tag/wallpapers";

// Listing pages scanned before giving up; a month whose archive post has
// scrolled past this bound is unreachable.
pub const MAX_PAGE: u32 = 12;

// Path segments distinguishing the two wallpaper variants
pub const CALENDAR_DIR: &str = "/cal/";
pub const NO_CALENDAR_DIR: &str = "/nocal/";

pub const DEFAULT_RESOLUTION: &str = "1920x1080";

// Selectors and Patterns
pub const ARCHIVE_LINK_SELECTOR: &str = "article > h2 > a";
pub const WALLPAPER_LINK_SELECTOR: &str = "li > a";
pub const EXT_REGEX_PATTERN: &str = r"\.(jpg|jpeg|png|gif)$";
