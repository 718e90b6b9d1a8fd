// src/config.rs
use crate::constants::*;
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::types::{PostType, SiteOrigin, ValidatedUrl};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Public origin of the WordPress site (links under it become relative paths)
    #[arg(long, env = "WP_SITE_URL", default_value = DEFAULT_SITE_URL)]
    pub site_url: String,

    /// REST API base (defaults to <site-url>/wp-json/wp/v2)
    #[arg(long, env = "WP_REST_URL")]
    pub rest_url: Option<String>,

    /// WPGraphQL endpoint (defaults to <site-url>/graphql)
    #[arg(long, env = "WP_GRAPHQL_URL")]
    pub graphql_url: Option<String>,

    /// Directory that receives pages.json, posts.json, categories.json, locations.json
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Also fetch the media library index into media.json and download the files
    #[arg(long, default_value_t = false)]
    pub with_media: bool,

    /// Directory that receives downloaded media files (served as /images/wp/)
    #[arg(long, env = "WP_IMAGES_DIR", default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: String,

    /// Page id to fetch individually when the bulk page listing fails (repeatable)
    #[arg(long = "page-id", value_name = "ID")]
    pub fallback_page_ids: Vec<u64>,

    /// Skip every politeness delay and retry wait (for local mirrors only)
    #[arg(long, default_value_t = false)]
    pub no_delay: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Custom post type slug holding the location pages
    #[arg(long, default_value = DEFAULT_LOCATION_POST_TYPE)]
    pub location_type: String,

    /// GraphQL type name of the location post type
    #[arg(long, default_value = DEFAULT_LOCATION_GRAPHQL_TYPE)]
    pub location_graphql_type: String,

    /// Public path prefix for location pages
    #[arg(long, default_value = DEFAULT_LOCATION_URI_PREFIX)]
    pub location_prefix: String,

    /// Stop REST listings after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,
}

/// Pauses inserted between requests and between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    pub rest_page: Duration,
    pub graphql_page: Duration,
    pub item: Duration,
    pub after_categories: Duration,
    pub after_posts: Duration,
    pub after_pages: Duration,
}

impl Throttle {
    /// No pauses at all.
    pub const fn none() -> Self {
        Self {
            rest_page: Duration::ZERO,
            graphql_page: Duration::ZERO,
            item: Duration::ZERO,
            after_categories: Duration::ZERO,
            after_posts: Duration::ZERO,
            after_pages: Duration::ZERO,
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            rest_page: REST_PAGE_DELAY,
            graphql_page: GRAPHQL_PAGE_DELAY,
            item: ITEM_DELAY,
            after_categories: SHORT_STAGE_DELAY,
            after_posts: LONG_STAGE_DELAY,
            after_pages: LONG_STAGE_DELAY,
        }
    }
}

/// Retry budgets per kind of call site, plus the throttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    pub throttle: Throttle,
    pub rest_list: RetryPolicy,
    pub rest_single: RetryPolicy,
    pub graphql: RetryPolicy,
}

impl FetchPolicy {
    /// Keeps the attempt budgets but never sleeps.
    pub fn without_delays() -> Self {
        Self {
            throttle: Throttle::none(),
            rest_list: RetryPolicy::immediate(REST_LIST_RETRY.max_attempts),
            rest_single: RetryPolicy::immediate(REST_SINGLE_RETRY.max_attempts),
            graphql: RetryPolicy::immediate(GRAPHQL_RETRY.max_attempts),
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            throttle: Throttle::default(),
            rest_list: REST_LIST_RETRY,
            rest_single: REST_SINGLE_RETRY,
            graphql: GRAPHQL_RETRY,
        }
    }
}

/// Where location pages come from and where they are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSettings {
    pub post_type: PostType,
    pub graphql_type: String,
    pub uri_prefix: String,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            post_type: PostType::new(DEFAULT_LOCATION_POST_TYPE)
                .expect("Default location post type should be valid"),
            graphql_type: DEFAULT_LOCATION_GRAPHQL_TYPE.to_string(),
            uri_prefix: DEFAULT_LOCATION_URI_PREFIX.to_string(),
        }
    }
}

/// Resolved pipeline configuration, validated and ready to drive every stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub origin: SiteOrigin,
    pub rest_base: ValidatedUrl,
    pub graphql_url: ValidatedUrl,
    pub output_dir: PathBuf,
    pub images_dir: PathBuf,
    pub verbose: bool,
    pub include_media: bool,
    pub fallback_page_ids: Vec<u64>,
    pub location: LocationSettings,
    pub request_timeout: Duration,
    pub max_pages: Option<u32>,
    pub policy: FetchPolicy,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let origin = SiteOrigin::parse(&cli.site_url)?;

        let rest_base = match cli.rest_url.as_deref() {
            Some(url) => ValidatedUrl::parse(url)?,
            None => ValidatedUrl::parse(&format!("{}/{}", origin, REST_API_PATH))?,
        };
        let graphql_url = match cli.graphql_url.as_deref() {
            Some(url) => ValidatedUrl::parse(url)?,
            None => ValidatedUrl::parse(&format!("{}/{}", origin, GRAPHQL_PATH))?,
        };

        if cli.output_dir.trim().is_empty() {
            return Err(AppError::MissingConfiguration(
                "output directory cannot be empty".to_string(),
            ));
        }
        if cli.with_media && cli.images_dir.trim().is_empty() {
            return Err(AppError::MissingConfiguration(
                "images directory cannot be empty when downloading media".to_string(),
            ));
        }
        if cli.timeout_secs == 0 {
            return Err(AppError::MissingConfiguration(
                "request timeout must be at least one second".to_string(),
            ));
        }

        let location = LocationSettings {
            post_type: PostType::new(cli.location_type)?,
            graphql_type: cli.location_graphql_type,
            uri_prefix: normalize_prefix(&cli.location_prefix),
        };

        let policy = if cli.no_delay {
            FetchPolicy::without_delays()
        } else {
            FetchPolicy::default()
        };

        Ok(PipelineConfig {
            origin,
            rest_base,
            graphql_url,
            output_dir: PathBuf::from(cli.output_dir),
            images_dir: PathBuf::from(cli.images_dir),
            verbose: cli.verbose,
            include_media: cli.with_media,
            fallback_page_ids: cli.fallback_page_ids,
            location,
            request_timeout: Duration::from_secs(cli.timeout_secs),
            max_pages: cli.max_pages,
            policy,
        })
    }

    /// Configuration pointing every endpoint at `base`, with no delays.
    ///
    /// Links in fixtures still carry `origin`, so URL normalization can be
    /// exercised against a local mock server.
    pub fn for_endpoint(base: &str, origin: &str) -> Result<Self, AppError> {
        let base = base.trim_end_matches('/');
        Ok(Self {
            origin: SiteOrigin::parse(origin)?,
            rest_base: ValidatedUrl::parse(&format!("{}/{}", base, REST_API_PATH))?,
            graphql_url: ValidatedUrl::parse(&format!("{}/{}", base, GRAPHQL_PATH))?,
            policy: FetchPolicy::without_delays(),
            ..Self::default()
        })
    }
}

/// Ensures a path prefix starts and ends with `/`.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            origin: SiteOrigin::parse(DEFAULT_SITE_URL).expect("Default site URL should be valid"),
            rest_base: ValidatedUrl::parse(&format!("{}/{}", DEFAULT_SITE_URL, REST_API_PATH))
                .expect("Default REST URL should be valid"),
            graphql_url: ValidatedUrl::parse(&format!("{}/{}", DEFAULT_SITE_URL, GRAPHQL_PATH))
                .expect("Default GraphQL URL should be valid"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            verbose: false,
            include_media: false,
            fallback_page_ids: Vec::new(),
            location: LocationSettings::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_pages: None,
            policy: FetchPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["wp-prefetch"];
        argv.extend_from_slice(args);
        CommandLineInput::parse_from(argv)
    }

    #[test]
    fn endpoints_derive_from_site_url() {
        let config =
            PipelineConfig::resolve(parse(&["--site-url", "https://cms.example.org/"])).unwrap();
        assert_eq!(
            config.rest_base.as_str(),
            "https://cms.example.org/wp-json/wp/v2"
        );
        assert_eq!(config.graphql_url.as_str(), "https://cms.example.org/graphql");
        assert_eq!(config.origin.host(), "cms.example.org");
    }

    #[test]
    fn explicit_endpoints_override_derivation() {
        let config = PipelineConfig::resolve(parse(&[
            "--site-url",
            "https://cms.example.org",
            "--graphql-url",
            "https://gql.example.org/graphql",
        ]))
        .unwrap();
        assert_eq!(config.graphql_url.as_str(), "https://gql.example.org/graphql");
    }

    #[test]
    fn no_delay_keeps_attempt_budgets() {
        let config = PipelineConfig::resolve(parse(&["--no-delay"])).unwrap();
        assert_eq!(config.policy.throttle, Throttle::none());
        assert_eq!(config.policy.rest_list.max_attempts, 8);
        assert_eq!(config.policy.graphql.max_attempts, 5);
        assert_eq!(config.policy.rest_list.total_delay(), Duration::ZERO);
    }

    #[test]
    fn repeated_page_ids_are_collected() {
        let config =
            PipelineConfig::resolve(parse(&["--page-id", "4698", "--page-id", "3653"])).unwrap();
        assert_eq!(config.fallback_page_ids, vec![4698, 3653]);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(PipelineConfig::resolve(parse(&["--site-url", "not a url"])).is_err());
        assert!(PipelineConfig::resolve(parse(&["--timeout-secs", "0"])).is_err());
        assert!(PipelineConfig::resolve(parse(&["--location-type", "Bad Type"])).is_err());
        assert!(PipelineConfig::resolve(parse(&["--with-media", "--images-dir", " "])).is_err());
    }

    #[test]
    fn images_dir_defaults_to_the_public_tree() {
        let config = PipelineConfig::resolve(parse(&["--with-media"])).unwrap();
        assert!(config.include_media);
        assert_eq!(config.images_dir, PathBuf::from("public/images/wp"));

        let config = PipelineConfig::resolve(parse(&["--images-dir", "static/img"])).unwrap();
        assert_eq!(config.images_dir, PathBuf::from("static/img"));
    }

    #[test]
    fn location_prefix_is_slash_wrapped() {
        assert_eq!(normalize_prefix("aba-therapy/texas"), "/aba-therapy/texas/");
        assert_eq!(normalize_prefix("/locations/"), "/locations/");
        assert_eq!(normalize_prefix(""), "/");
    }
}
