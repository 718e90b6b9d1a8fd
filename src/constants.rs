// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them top to bottom tells you how politely the tool treats the origin:
//! how many items per request, how long it pauses, how often it retries.

use crate::error_recovery::RetryPolicy;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Site defaults
// ---------------------------------------------------------------------------

/// Public origin of the site whose content is snapshotted.
pub const DEFAULT_SITE_URL: &str = "https://prosperahealthcare.com";

/// REST namespace below the site origin.
pub const REST_API_PATH: &str = "wp-json/wp/v2";

/// WPGraphQL endpoint below the site origin.
pub const GRAPHQL_PATH: &str = "graphql";

/// Where the static build expects the JSON snapshot.
pub const DEFAULT_OUTPUT_DIR: &str = "src/data";

/// Custom post type holding the geography-specific service pages.
pub const DEFAULT_LOCATION_POST_TYPE: &str = "aba-therapy";

/// GraphQL fragment type for the location post type.
pub const DEFAULT_LOCATION_GRAPHQL_TYPE: &str = "ABATherapy";

/// Public path prefix of a location page; the slug is appended.
pub const DEFAULT_LOCATION_URI_PREFIX: &str = "/aba-therapy/texas/";

/// Location section of the English site.
pub const LOCATION_SECTION_EN: &str = "/aba-therapy/texas/";

/// Location section of the Spanish site, below the `/es` prefix.
pub const LOCATION_SECTION_ES: &str = "/terapia-aba/texas/";

/// Where media files are downloaded; served as [`MEDIA_PUBLIC_PREFIX`].
pub const DEFAULT_IMAGES_DIR: &str = "public/images/wp";

/// Public path under which downloaded media is served.
pub const MEDIA_PUBLIC_PREFIX: &str = "/images/wp/";

/// Gravatar size picked from `avatar_urls`.
pub const AUTHOR_AVATAR_SIZE: &str = "96";

// ---------------------------------------------------------------------------
// API boundaries
// ---------------------------------------------------------------------------

/// Items requested per page. WordPress caps `per_page` at 100.
pub const WP_API_PAGE_SIZE: u32 = 100;

/// Response header carrying the REST page count.
pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// Per-request timeout on the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Retry budgets
// ---------------------------------------------------------------------------

/// REST listings: 5 s, 10 s, 15 s ... capped at 30 s, eight attempts.
pub const REST_LIST_RETRY: RetryPolicy =
    RetryPolicy::new(8, Duration::from_secs(5), Duration::from_secs(30));

/// GraphQL requests: 3 s, 6 s ... capped at 15 s, five attempts.
pub const GRAPHQL_RETRY: RetryPolicy =
    RetryPolicy::new(5, Duration::from_secs(3), Duration::from_secs(15));

/// Single resources (page by id, media file): 2 s, 4 s, three attempts.
pub const REST_SINGLE_RETRY: RetryPolicy =
    RetryPolicy::new(3, Duration::from_secs(2), Duration::from_secs(30));

// ---------------------------------------------------------------------------
// Throttling
// ---------------------------------------------------------------------------

/// Pause between consecutive REST listing pages.
pub const REST_PAGE_DELAY: Duration = Duration::from_millis(2000);

/// Pause between consecutive GraphQL cursor pages.
pub const GRAPHQL_PAGE_DELAY: Duration = Duration::from_millis(1000);

/// Pause between per-item requests (location bodies, pages by id).
pub const ITEM_DELAY: Duration = Duration::from_millis(1500);

/// Pause after the categories stage.
pub const SHORT_STAGE_DELAY: Duration = Duration::from_millis(3000);

/// Pause after the posts and pages stages, the two heaviest.
pub const LONG_STAGE_DELAY: Duration = Duration::from_millis(5000);

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

/// Maximum characters of a URL shown in per-request log lines.
pub const LOGGED_URL_LENGTH: usize = 80;
