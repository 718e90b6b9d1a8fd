// src/api/queries.rs
//! GraphQL documents sent to WPGraphQL.

use crate::config::LocationSettings;
use crate::constants::WP_API_PAGE_SIZE;

/// Lists every node of the location post type. Bodies are not requested
/// here; the custom type's GraphQL schema does not expose them, so they
/// come from REST afterwards.
pub fn locations_query(settings: &LocationSettings) -> String {
    format!(
        r#"
  query GetAllLocations($after: String) {{
    contentNodes(
      where: {{ contentTypes: {content_type} }}
      first: {page_size}
      after: $after
    ) {{
      pageInfo {{
        hasNextPage
        endCursor
      }}
      nodes {{
        ... on {graphql_type} {{
          id
          databaseId
          slug
          title
          featuredImage {{
            node {{
              sourceUrl
              altText
              mediaDetails {{
                width
                height
              }}
            }}
          }}
        }}
      }}
    }}
  }}
"#,
        content_type = settings.post_type.graphql_enum(),
        page_size = WP_API_PAGE_SIZE,
        graphql_type = settings.graphql_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_names_the_configured_type() {
        let query = locations_query(&LocationSettings::default());
        assert!(query.contains("contentTypes: ABA_THERAPY"));
        assert!(query.contains("... on ABATherapy {"));
        assert!(query.contains("first: 100"));
        assert!(query.contains("after: $after"));
    }
}
