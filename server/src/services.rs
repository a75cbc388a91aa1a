pub(crate) mod posts {
    use std::path::PathBuf;
    use std::sync::Arc;

    use posts_list::{PostData, PostSummary};
    use serde::Deserialize;

    /// Source of every published post, newest first.
    ///
    /// Ordering is the provider's responsibility; callers slice the result as is.
    pub(crate) trait SortedPosts {
        fn sorted_posts(&self) -> impl Future<Output = Result<Arc<[Post]>, PostsError>> + Send;
    }

    /// A post record from the site build's index.
    ///
    /// Only the listed front matter is kept; rendered bodies and any other
    /// fields in the record are dropped on load and never served.
    #[derive(Debug, Clone, Deserialize)]
    pub(crate) struct Post {
        pub(crate) slug: String,
        pub(crate) data: PostData,
    }

    impl Post {
        pub(crate) fn summary(&self) -> PostSummary {
            PostSummary {
                slug: self.slug.clone(),
                data: self.data.clone(),
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    pub(crate) enum PostsError {
        #[error("Failed to read post index {}: {source}", path.display())]
        Read {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("Malformed post index {}: {source}", path.display())]
        Parse {
            path: PathBuf,
            #[source]
            source: serde_json::Error,
        },
    }

}
