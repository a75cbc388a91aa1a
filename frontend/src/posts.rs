use leptos::prelude::*;
use posts_list::{PostSummary, PostsPage};

use crate::AppError;

#[component]
pub fn PostList() -> impl IntoView {
    let (next_page, set_next_page) = signal(1_i64);
    let (posts, set_posts) = signal(Vec::<PostSummary>::new());
    let (has_more, set_has_more) = signal(false);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load_more = move || {
        if loading.get_untracked() {
            return;
        }
        let page = next_page.get_untracked();
        set_loading.set(true);
        leptos::task::spawn_local(async move {
            match fetch_page(page).await {
                Ok(PostsPage {
                    posts: fetched,
                    has_more,
                    ..
                }) => {
                    set_posts.write().extend(fetched);
                    set_has_more.set(has_more);
                    set_next_page.set(page + 1);
                    set_error.set(None);
                }
                Err(e) => {
                    leptos::logging::error!("{}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };
    load_more();

    view! {
        <main class="container flex flex-col gap-4">
            <ul class="flex flex-col gap-4">
                <For each=move || posts.get() key=|post| post.slug.clone() let(post)>
                    <PostCard post />
                </For>
            </ul>
            {move || error.get().map(|message| view! {
                <div class="alert alert-error">{message}</div>
            })}
            <Show when=move || has_more.get()>
                <button
                    type="button"
                    class="btn btn-outline"
                    disabled=move || loading.get()
                    on:click=move |_| load_more()
                >
                    "Load more"
                </button>
            </Show>
        </main>
    }
}

#[component]
fn PostCard(post: PostSummary) -> impl IntoView {
    let PostSummary { slug, data } = post;
    let href = format!("/posts/{slug}/");
    let published = data.published.date_naive().to_string();

    view! {
        <li class="card card-border">
            <div class="card-body">
                <a class="card-title" href=href>{data.title}</a>
                <div class="flex flex-row gap-2 text-sm opacity-75">
                    <time>{published}</time>
                    {data.category.map(|category| view! { <span>{category}</span> })}
                </div>
                <p>{data.description}</p>
                <ul class="flex flex-row gap-2">
                    {data
                        .tags
                        .into_iter()
                        .map(|tag| view! { <li class="badge badge-ghost">{tag}</li> })
                        .collect_view()}
                </ul>
            </div>
        </li>
    }
}

async fn fetch_page(page: i64) -> Result<PostsPage, AppError> {
    let resp = gloo_net::http::Request::get("/api/posts")
        .query([("page", page.to_string())])
        .header("accept", "application/json")
        .send()
        .await
        .map_err(|e| AppError::PostsLoad(e.to_string()))?;

    if !resp.ok() {
        return Err(AppError::PostsLoad(format!(
            "server answered {}",
            resp.status()
        )));
    }

    resp.json()
        .await
        .map_err(|e| AppError::PostsLoad(e.to_string()))
}
