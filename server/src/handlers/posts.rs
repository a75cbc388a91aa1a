use std::ops::Range;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use posts_list::PostsPage;

use crate::services::posts::{Post, SortedPosts};

/// Posts per page on every listing of the site.
pub(crate) const PAGE_SIZE: usize = 8;

/// `GET /api/posts?page=N`
pub(crate) async fn list_posts<Provider>(
    State(provider): State<Provider>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse
where
    Provider: SortedPosts,
{
    let page = page_number(&params);
    match provider.sorted_posts().await {
        Err(e) => crate::responses::Error::from(e).into_response(),
        Ok(posts) => (
            StatusCode::OK,
            [("content-type", "application/json")],
            Json(paginate(&posts, page, PAGE_SIZE)),
        )
            .into_response(),
    }
}

/// The first `page` parameter, read up to the end of its leading integer
/// (`2.5` and `2abc` are page 2). Falls back to 1 when it is absent or has no
/// digits. Zero and negative pages are passed through.
fn page_number(params: &[(String, String)]) -> i64 {
    params
        .iter()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| leading_integer(value))
        .unwrap_or(1)
}

/// Optional sign followed by at least one digit; out of range values saturate.
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let digits = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let sign = value.len() - unsigned.len();
    let negative = value.starts_with('-');
    Some(
        value[..sign + digits]
            .parse()
            .unwrap_or(if negative { i64::MIN } else { i64::MAX }),
    )
}

pub(crate) fn paginate(posts: &[Post], page: i64, page_size: usize) -> PostsPage {
    let total_pages = posts.len().div_ceil(page_size) as u64;
    PostsPage {
        posts: posts[page_bounds(posts.len(), page, page_size)]
            .iter()
            .map(Post::summary)
            .collect(),
        total_pages,
        current_page: page,
        has_more: i128::from(page) < i128::from(total_pages),
    }
}

/// `[(page - 1) * page_size, page * page_size)` clipped to `0..len`.
fn page_bounds(len: usize, page: i64, page_size: usize) -> Range<usize> {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| index.checked_mul(page_size))
    else {
        return 0..0;
    };
    let start = start.min(len);
    start..start.saturating_add(page_size).min(len)
}
