use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of posts as returned by `GET /api/posts`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub posts: Vec<PostSummary>,
    pub total_pages: u64,
    pub current_page: i64,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub data: PostData,
}

/// The subset of a post's front matter exposed to listing clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PostData {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub published: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub draft: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_keys_are_camel_case() {
        let page = PostsPage {
            posts: vec![],
            total_pages: 3,
            current_page: 1,
            has_more: true,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["hasMore"], true);
        assert!(json["posts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn absent_updated_and_image_are_omitted() {
        let summary = PostSummary {
            slug: "hello".to_owned(),
            data: PostData {
                title: "Hello".to_owned(),
                tags: vec!["intro".to_owned()],
                category: None,
                published: "2024-03-01T00:00:00Z".parse().unwrap(),
                updated: None,
                image: None,
                description: String::new(),
                draft: false,
            },
        };
        let json = serde_json::to_value(&summary).unwrap();
        let data = json["data"].as_object().unwrap();
        assert!(!data.contains_key("updated"));
        assert!(!data.contains_key("image"));
        assert_eq!(data["category"], serde_json::Value::Null);
        assert_eq!(json["slug"], "hello");
    }

    #[test]
    fn missing_optional_front_matter_uses_defaults() {
        let data: PostData =
            serde_json::from_str(r#"{"title":"Bare","published":"2023-01-01T00:00:00Z"}"#)
                .unwrap();
        assert!(data.tags.is_empty());
        assert!(data.category.is_none());
        assert_eq!(data.description, "");
        assert!(!data.draft);
    }
}
