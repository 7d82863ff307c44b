//! # Feed, comment, like and save operations
//!
//! Every read and write the widgets perform, expressed once against
//! [`RemoteStore`] so the same code runs over HTTP and in tests.
//!
//! ## Reads
//!
//! | Function | Remote call |
//! |----------|-------------|
//! | [`fetch_feed`] | `posts` (`id, content, created_at, photos, profiles(id, avatar, name)`), `parent is null`, `created_at desc` |
//! | [`fetch_author_posts`] | same as the feed, plus `author = id` |
//! | [`fetch_comments`] | `posts` (`*, profiles(*)`), `parent = post` |
//! | [`fetch_likes`] | `likes`, `post_id = post` |
//! | [`fetch_is_saved`] | `saved_posts`, `post_id = post`, `user_id = me`; saved when non-empty |
//! | [`fetch_saved_posts`] | `saved_posts`, `user_id = me`, then `posts` with `id in (..)` |
//! | [`fetch_profile`] | `profiles`, `id = id` |
//!
//! ## Writes
//!
//! [`like_post`] / [`unlike_post`], [`save_post`] / [`unsave_post`],
//! [`create_post`] and [`post_comment`] each issue exactly one insert or
//! delete. None of them re-reads anything; refreshing local state afterwards
//! is the caller's job.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use store::{Filter, Like, Post, PostWithAuthor, Profile, RemoteStore, SavedPost, Select, Table};

use crate::error::ApiError;

/// Post columns the feed renders.
pub const FEED_COLUMNS: &[&str] = &["id", "content", "created_at", "photos"];
/// Author columns embedded with each feed post.
pub const AUTHOR_COLUMNS: &[&str] = &["id", "avatar", "name"];

fn decode<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, ApiError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(ApiError::from))
        .collect()
}

fn feed_query() -> Select {
    Select::from(Table::Posts)
        .columns(FEED_COLUMNS)
        .embed(Table::Profiles, AUTHOR_COLUMNS)
        .is_null("parent")
        .order_desc("created_at")
}

/// Top-level posts, newest first, with their authors.
pub async fn fetch_feed<S: RemoteStore>(store: &S) -> Result<Vec<PostWithAuthor>, ApiError> {
    decode(store.select(&feed_query()).await?)
}

/// Top-level posts written by one profile, newest first.
pub async fn fetch_author_posts<S: RemoteStore>(
    store: &S,
    author_id: &str,
) -> Result<Vec<PostWithAuthor>, ApiError> {
    decode(store.select(&feed_query().eq("author", author_id)).await?)
}

/// Comments on a post with their authors, in the order the service returns them.
pub async fn fetch_comments<S: RemoteStore>(
    store: &S,
    post_id: &str,
) -> Result<Vec<PostWithAuthor>, ApiError> {
    let q = Select::from(Table::Posts)
        .embed(Table::Profiles, &[])
        .eq("parent", post_id);
    decode(store.select(&q).await?)
}

pub async fn fetch_likes<S: RemoteStore>(store: &S, post_id: &str) -> Result<Vec<Like>, ApiError> {
    let q = Select::from(Table::Likes).eq("post_id", post_id);
    decode(store.select(&q).await?)
}

pub async fn fetch_is_saved<S: RemoteStore>(
    store: &S,
    post_id: &str,
    user_id: &str,
) -> Result<bool, ApiError> {
    let q = Select::from(Table::SavedPosts)
        .eq("post_id", post_id)
        .eq("user_id", user_id);
    Ok(!store.select(&q).await?.is_empty())
}

/// Posts a user has saved, newest post first.
pub async fn fetch_saved_posts<S: RemoteStore>(
    store: &S,
    user_id: &str,
) -> Result<Vec<PostWithAuthor>, ApiError> {
    let q = Select::from(Table::SavedPosts).eq("user_id", user_id);
    let saved: Vec<SavedPost> = decode(store.select(&q).await?)?;
    if saved.is_empty() {
        return Ok(Vec::new());
    }

    let ids = saved.into_iter().map(|s| s.post_id).collect();
    let q = Select::from(Table::Posts)
        .columns(FEED_COLUMNS)
        .embed(Table::Profiles, AUTHOR_COLUMNS)
        .is_in("id", ids)
        .order_desc("created_at");
    decode(store.select(&q).await?)
}

pub async fn fetch_profile<S: RemoteStore>(store: &S, id: &str) -> Result<Option<Profile>, ApiError> {
    let q = Select::from(Table::Profiles).eq("id", id);
    let mut profiles: Vec<Profile> = decode(store.select(&q).await?)?;
    Ok((!profiles.is_empty()).then(|| profiles.swap_remove(0)))
}

/// Whether `user_id` appears in a fetched likes list.
pub fn is_liked_by(likes: &[Like], user_id: &str) -> bool {
    likes.iter().any(|like| like.user_id == user_id)
}

pub async fn like_post<S: RemoteStore>(store: &S, post_id: &str, user_id: &str) -> Result<(), ApiError> {
    store
        .insert(Table::Likes, json!({ "post_id": post_id, "user_id": user_id }))
        .await?;
    Ok(())
}

pub async fn unlike_post<S: RemoteStore>(store: &S, post_id: &str, user_id: &str) -> Result<(), ApiError> {
    store
        .delete(
            Table::Likes,
            &[Filter::eq("post_id", post_id), Filter::eq("user_id", user_id)],
        )
        .await?;
    Ok(())
}

pub async fn save_post<S: RemoteStore>(store: &S, post_id: &str, user_id: &str) -> Result<(), ApiError> {
    store
        .insert(Table::SavedPosts, json!({ "user_id": user_id, "post_id": post_id }))
        .await?;
    Ok(())
}

pub async fn unsave_post<S: RemoteStore>(store: &S, post_id: &str, user_id: &str) -> Result<(), ApiError> {
    store
        .delete(
            Table::SavedPosts,
            &[Filter::eq("post_id", post_id), Filter::eq("user_id", user_id)],
        )
        .await?;
    Ok(())
}

/// Publish a top-level post.
pub async fn create_post<S: RemoteStore>(store: &S, author_id: &str, content: &str) -> Result<Post, ApiError> {
    let row = store
        .insert(Table::Posts, json!({ "content": content, "author": author_id }))
        .await?;
    Ok(serde_json::from_value(row)?)
}

/// Comment on `parent_id`. The content is sent as typed, empty or not.
pub async fn post_comment<S: RemoteStore>(
    store: &S,
    parent_id: &str,
    author_id: &str,
    content: &str,
) -> Result<Post, ApiError> {
    let row = store
        .insert(
            Table::Posts,
            json!({ "content": content, "author": author_id, "parent": parent_id }),
        )
        .await?;
    Ok(serde_json::from_value(row)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{MemoryStore, StoreError};

    fn store_with_people() -> MemoryStore {
        let store = MemoryStore::new();
        store.seed(
            Table::Profiles,
            [
                json!({ "id": "ada", "name": "Ada", "avatar": "ada.png" }),
                json!({ "id": "alan", "name": "Alan", "avatar": null }),
            ],
        );
        store
    }

    #[tokio::test]
    async fn test_feed_is_top_level_newest_first() {
        let store = store_with_people();
        store.seed(
            Table::Posts,
            [
                json!({ "id": "p1", "content": "older", "author": "ada", "parent": null,
                        "created_at": "2024-01-01T09:00:00Z" }),
                json!({ "id": "p2", "content": "newer", "author": "alan", "parent": null,
                        "created_at": "2024-01-02T09:00:00Z" }),
                json!({ "id": "c1", "content": "reply", "author": "alan", "parent": "p1",
                        "created_at": "2024-01-03T09:00:00Z" }),
            ],
        );

        let feed = fetch_feed(&store).await.unwrap();
        let ids: Vec<&str> = feed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
        assert_eq!(feed[0].author_name(), "Alan");
        assert_eq!(feed[1].author.as_ref().and_then(|a| a.avatar.as_deref()), Some("ada.png"));
    }

    #[tokio::test]
    async fn test_like_and_unlike() {
        let store = store_with_people();

        like_post(&store, "p1", "ada").await.unwrap();
        let likes = fetch_likes(&store, "p1").await.unwrap();
        assert!(is_liked_by(&likes, "ada"));
        assert!(!is_liked_by(&likes, "alan"));

        unlike_post(&store, "p1", "ada").await.unwrap();
        assert!(fetch_likes(&store, "p1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_like_is_rejected_by_remote() {
        let store = store_with_people();
        like_post(&store, "p1", "ada").await.unwrap();

        let err = like_post(&store, "p1", "ada").await.unwrap_err();
        assert!(matches!(err, ApiError::Store(StoreError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_comment_carries_author_and_parent() {
        let store = store_with_people();
        let top = create_post(&store, "ada", "hello").await.unwrap();

        let comment = post_comment(&store, &top.id, "alan", "hi back").await.unwrap();
        assert_eq!(comment.parent.as_deref(), Some(top.id.as_str()));

        let comments = fetch_comments(&store, &top.id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "hi back");
        assert_eq!(comments[0].author.as_ref().unwrap().id, "alan");

        // comments never show up in the feed
        let feed = fetch_feed(&store).await.unwrap();
        assert_eq!(feed.len(), 1);
    }

    #[tokio::test]
    async fn test_comment_without_visible_author_keeps_the_list() {
        let store = store_with_people();
        let top = create_post(&store, "ada", "hello").await.unwrap();
        post_comment(&store, &top.id, "alan", "first").await.unwrap();
        // author has no profiles row, so the embed comes back null
        post_comment(&store, &top.id, "ghost", "second").await.unwrap();

        let comments = fetch_comments(&store, &top.id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author_name(), "Alan");
        assert!(comments[1].author.is_none());
        assert_eq!(comments[1].author_name(), "Unknown");
    }

    #[tokio::test]
    async fn test_saved_posts() {
        let store = store_with_people();
        assert!(fetch_saved_posts(&store, "ada").await.unwrap().is_empty());

        let a = create_post(&store, "alan", "first").await.unwrap();
        let b = create_post(&store, "alan", "second").await.unwrap();
        create_post(&store, "alan", "third").await.unwrap();

        save_post(&store, &a.id, "ada").await.unwrap();
        save_post(&store, &b.id, "ada").await.unwrap();
        assert!(fetch_is_saved(&store, &a.id, "ada").await.unwrap());
        assert!(!fetch_is_saved(&store, &a.id, "alan").await.unwrap());

        let saved = fetch_saved_posts(&store, "ada").await.unwrap();
        let ids: Vec<&str> = saved.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, [b.id.as_str(), a.id.as_str()]);

        unsave_post(&store, &a.id, "ada").await.unwrap();
        assert!(!fetch_is_saved(&store, &a.id, "ada").await.unwrap());
    }

    #[tokio::test]
    async fn test_profile_and_author_posts() {
        let store = store_with_people();
        create_post(&store, "ada", "mine").await.unwrap();
        create_post(&store, "alan", "his").await.unwrap();

        let profile = fetch_profile(&store, "ada").await.unwrap().unwrap();
        assert_eq!(profile.display_name(), "Ada");
        assert!(fetch_profile(&store, "nobody").await.unwrap().is_none());

        let posts = fetch_author_posts(&store, "ada").await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "mine");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let store = store_with_people();
        store.fail_next(Table::Posts);
        assert!(fetch_feed(&store).await.is_err());
        assert!(fetch_feed(&store).await.is_ok());
    }
}
