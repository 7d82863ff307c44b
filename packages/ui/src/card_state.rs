//! # Post card state and its interaction handlers
//!
//! A [`PostCardState`] is the local state one post card owns: the fetched
//! likes and comments, the comment draft, the saved flag and the menu. It is
//! only ever rebuilt from the remote service; nothing here merges or guesses,
//! with one exception noted on [`toggle_save`].
//!
//! Each handler is an async function that talks to the remote service and
//! returns a [`CardUpdate`] describing which slots to replace. Components
//! take a snapshot of whatever the handler needs (e.g. the liked flag) when
//! the event fires, spawn the handler, and [`apply`](PostCardState::apply)
//! the update when it resolves. Two handlers spawned from the same snapshot
//! therefore race at the remote, exactly as two quick clicks do.
//!
//! Failures are logged with `tracing` and produce an empty update, so the
//! card keeps what it had.

use api::social;
use store::{Like, PostWithAuthor, RemoteStore};

use crate::menu::{MenuEvent, MenuState};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostCardState {
    pub likes: Vec<Like>,
    pub comments: Vec<PostWithAuthor>,
    pub comment_text: String,
    pub is_saved: bool,
    pub menu: MenuState,
}

/// Slots to overwrite after a handler resolves. `None` leaves a slot alone.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct CardUpdate {
    pub likes: Option<Vec<Like>>,
    pub comments: Option<Vec<PostWithAuthor>>,
    pub is_saved: Option<bool>,
    pub clear_draft: bool,
    pub close_menu: bool,
}

impl PostCardState {
    /// Whether `user_id` is among the fetched likes.
    pub fn liked_by(&self, user_id: &str) -> bool {
        social::is_liked_by(&self.likes, user_id)
    }

    pub fn apply(&mut self, update: CardUpdate) {
        if let Some(likes) = update.likes {
            self.likes = likes;
        }
        if let Some(comments) = update.comments {
            self.comments = comments;
        }
        if let Some(saved) = update.is_saved {
            self.is_saved = saved;
        }
        if update.clear_draft {
            self.comment_text.clear();
        }
        if update.close_menu {
            self.menu = self.menu.next(MenuEvent::ActionCompleted);
        }
    }

    pub fn menu_event(&mut self, event: MenuEvent) {
        self.menu = self.menu.next(event);
    }
}

pub async fn load_likes<S: RemoteStore>(store: &S, post_id: &str) -> CardUpdate {
    match social::fetch_likes(store, post_id).await {
        Ok(likes) => CardUpdate {
            likes: Some(likes),
            ..Default::default()
        },
        Err(e) => {
            tracing::error!(post = post_id, "Error fetching likes: {e}");
            CardUpdate::default()
        }
    }
}

pub async fn load_comments<S: RemoteStore>(store: &S, post_id: &str) -> CardUpdate {
    match social::fetch_comments(store, post_id).await {
        Ok(comments) => CardUpdate {
            comments: Some(comments),
            ..Default::default()
        },
        Err(e) => {
            tracing::error!(post = post_id, "Error fetching comments: {e}");
            CardUpdate::default()
        }
    }
}

pub async fn load_saved<S: RemoteStore>(store: &S, post_id: &str, user_id: &str) -> CardUpdate {
    match social::fetch_is_saved(store, post_id, user_id).await {
        Ok(saved) => CardUpdate {
            is_saved: Some(saved),
            ..Default::default()
        },
        Err(e) => {
            tracing::error!(post = post_id, "Error fetching saved status: {e}");
            CardUpdate::default()
        }
    }
}

/// Unlike if `liked`, like otherwise; then re-fetch the likes on success.
///
/// `liked` is whatever the card showed when the click happened. Nothing stops
/// a second click from deciding on the same stale value.
pub async fn toggle_like<S: RemoteStore>(
    store: &S,
    post_id: &str,
    user_id: &str,
    liked: bool,
) -> CardUpdate {
    let result = if liked {
        social::unlike_post(store, post_id, user_id).await
    } else {
        social::like_post(store, post_id, user_id).await
    };

    match result {
        Ok(()) => load_likes(store, post_id).await,
        Err(e) => {
            let action = if liked { "unliking" } else { "liking" };
            tracing::error!(post = post_id, "Error {action} post: {e}");
            CardUpdate::default()
        }
    }
}

/// Unsave if `saved`, save otherwise, and close the menu.
///
/// The flag is set from the branch taken, not re-read. A failed mutation is
/// logged and the flag still flips, so it can disagree with the remote until
/// the card is mounted again.
pub async fn toggle_save<S: RemoteStore>(
    store: &S,
    post_id: &str,
    user_id: &str,
    saved: bool,
) -> CardUpdate {
    let result = if saved {
        social::unsave_post(store, post_id, user_id).await
    } else {
        social::save_post(store, post_id, user_id).await
    };

    if let Err(e) = result {
        let action = if saved { "unsaving" } else { "saving" };
        tracing::error!(post = post_id, "Error {action} post: {e}");
    }

    CardUpdate {
        is_saved: Some(!saved),
        close_menu: true,
        ..Default::default()
    }
}

/// Insert a comment, then clear the draft and re-fetch the comments.
///
/// The new comment only appears once the re-fetch lands. If the insert
/// fails the draft is kept.
pub async fn submit_comment<S: RemoteStore>(
    store: &S,
    post_id: &str,
    user_id: &str,
    content: &str,
) -> CardUpdate {
    if let Err(e) = social::post_comment(store, post_id, user_id, content).await {
        tracing::error!(post = post_id, "Error posting comment: {e}");
        return CardUpdate::default();
    }

    let refreshed = load_comments(store, post_id).await;
    CardUpdate {
        clear_draft: true,
        ..refreshed
    }
}
