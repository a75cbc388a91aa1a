use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::services::posts::{Post, PostsError, SortedPosts};

struct CachedPosts {
    posts: Arc<[Post]>,
    expires_at: DateTime<Utc>,
}

/// Posts read from the JSON index written by the site build.
///
/// The sorted collection is kept for `ttl` before the file is read again.
#[derive(Clone)]
pub(crate) struct IndexFile {
    path: Arc<PathBuf>,
    include_drafts: bool,
    ttl: TimeDelta,
    cache: Arc<RwLock<Option<CachedPosts>>>,
}

impl IndexFile {
    pub(crate) fn new(path: PathBuf, include_drafts: bool, ttl: Duration) -> Self {
        Self {
            path: Arc::new(path),
            include_drafts,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn load(&self) -> Result<Arc<[Post]>, PostsError> {
        let path = self.path.as_ref();
        let raw = tokio::fs::read(path).await.map_err(|source| PostsError::Read {
            path: path.clone(),
            source,
        })?;
        let mut posts: Vec<Post> =
            serde_json::from_slice(&raw).map_err(|source| PostsError::Parse {
                path: path.clone(),
                source,
            })?;

        if !self.include_drafts {
            posts.retain(|post| !post.data.draft);
        }
        posts.sort_by(|a, b| b.data.published.cmp(&a.data.published));

        tracing::debug!(path = %path.display(), count = posts.len(), "loaded post index");
        Ok(posts.into())
    }
}

impl SortedPosts for IndexFile {
    async fn sorted_posts(&self) -> Result<Arc<[Post]>, PostsError> {
        let now = Utc::now();
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && now < cached.expires_at
            {
                return Ok(cached.posts.clone());
            }
        }

        let posts = self.load().await?;
        *self.cache.write().await = Some(CachedPosts {
            posts: posts.clone(),
            expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        });
        Ok(posts)
    }
}
