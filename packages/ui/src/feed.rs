//! Post-list loaders for the feed, profile and saved pages.
//!
//! Each returns `None` after logging when the remote call fails, so the
//! caller keeps the list it already shows.

use api::social;
use store::{PostWithAuthor, Profile, RemoteStore};

pub async fn load_feed<S: RemoteStore>(store: &S) -> Option<Vec<PostWithAuthor>> {
    match social::fetch_feed(store).await {
        Ok(posts) => {
            tracing::debug!(count = posts.len(), "feed loaded");
            Some(posts)
        }
        Err(e) => {
            tracing::error!("Error fetching posts: {e}");
            None
        }
    }
}

pub async fn load_author_posts<S: RemoteStore>(
    store: &S,
    author_id: &str,
) -> Option<Vec<PostWithAuthor>> {
    social::fetch_author_posts(store, author_id)
        .await
        .map_err(|e| tracing::error!(author = author_id, "Error fetching profile posts: {e}"))
        .ok()
}

pub async fn load_saved_posts<S: RemoteStore>(
    store: &S,
    user_id: &str,
) -> Option<Vec<PostWithAuthor>> {
    social::fetch_saved_posts(store, user_id)
        .await
        .map_err(|e| tracing::error!("Error fetching saved posts: {e}"))
        .ok()
}

/// A profile by id. Missing rows and failures both come back as `None`.
pub async fn load_profile<S: RemoteStore>(store: &S, id: &str) -> Option<Profile> {
    match social::fetch_profile(store, id).await {
        Ok(Some(profile)) => Some(profile),
        Ok(None) => {
            tracing::info!(id, "No profile found");
            None
        }
        Err(e) => {
            tracing::error!(id, "Error fetching profile: {e}");
            None
        }
    }
}

/// Publish a top-level post. Returns whether it was stored.
pub async fn publish_post<S: RemoteStore>(store: &S, author_id: &str, content: &str) -> bool {
    match social::create_post(store, author_id, content).await {
        Ok(post) => {
            tracing::info!(post = %post.id, "post published");
            true
        }
        Err(e) => {
            tracing::error!("Error creating post: {e}");
            false
        }
    }
}
