//! # Row models for the hosted tables
//!
//! Typed views over the JSON rows exchanged with the remote data service.
//! Every struct is `Serialize + Deserialize` so rows decode straight out of a
//! select response and re-encode for inserts.
//!
//! ## Types
//!
//! | Struct | Table | Notes |
//! |--------|-------|-------|
//! | [`Post`] | `posts` | A row with `parent = Some(..)` is a comment on that post. |
//! | [`PostWithAuthor`] | `posts` + `profiles` embed | What the feed and comment lists render. |
//! | [`Profile`] | `profiles` | `id` is the identity provider's user id. |
//! | [`Like`] | `likes` | `(post_id, user_id)` pair. |
//! | [`SavedPost`] | `saved_posts` | Same shape as [`Like`], different meaning. |
//!
//! Ids are issued by the remote service. Depending on how the tables were
//! created they come back as UUID strings or as integers, so every id field
//! goes through [`de::id`], which accepts both and stores a `String`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `profiles` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// URL of the avatar image.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

impl Profile {
    /// Name to render, falling back to a placeholder for unnamed profiles.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// A row of the `posts` table without its author embed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    #[serde(deserialize_with = "de::id")]
    pub author: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub parent: Option<String>,
}

/// A post together with the author profile embedded under `profiles`.
///
/// The feed select does not ask for the `author` column, so only the embed
/// identifies the author here. The embed is null when the author's profile
/// is gone or not visible to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub parent: Option<String>,
    #[serde(rename = "profiles", default)]
    pub author: Option<Profile>,
}

impl PostWithAuthor {
    pub fn author_name(&self) -> &str {
        self.author.as_ref().map_or("Unknown", Profile::display_name)
    }

    pub fn photos(&self) -> &[String] {
        self.photos.as_deref().unwrap_or_default()
    }
}

/// A row of the `likes` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Like {
    #[serde(deserialize_with = "de::id")]
    pub post_id: String,
    #[serde(deserialize_with = "de::id")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A row of the `saved_posts` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedPost {
    #[serde(deserialize_with = "de::id")]
    pub post_id: String,
    #[serde(deserialize_with = "de::id")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Deserializers shared by the row models.
pub mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    impl From<RawId> for String {
        fn from(raw: RawId) -> Self {
            match raw {
                RawId::Text(s) => s,
                RawId::Int(n) => n.to_string(),
            }
        }
    }

    /// Accept a string or integer id.
    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        RawId::deserialize(d).map(String::from)
    }

    /// Accept a nullable string or integer id.
    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Option::<RawId>::deserialize(d).map(|raw| raw.map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feed_row_decodes_with_embed() {
        let row = json!({
            "id": 7,
            "content": "hello",
            "created_at": "2024-03-01T10:00:00.123456+00:00",
            "photos": null,
            "profiles": { "id": "u-1", "avatar": "https://cdn/a.png", "name": "Ada" }
        });

        let post: PostWithAuthor = serde_json::from_value(row).unwrap();
        assert_eq!(post.id, "7");
        assert!(post.parent.is_none());
        assert!(post.photos().is_empty());
        assert_eq!(post.author_name(), "Ada");
    }

    #[test]
    fn test_null_author_embed_still_decodes() {
        let row = json!({
            "id": "c-2",
            "content": "orphaned",
            "created_at": "2024-03-01T10:00:00Z",
            "parent": 7,
            "profiles": null
        });

        let post: PostWithAuthor = serde_json::from_value(row).unwrap();
        assert!(post.author.is_none());
        assert_eq!(post.author_name(), "Unknown");
        assert_eq!(post.content, "orphaned");
    }

    #[test]
    fn test_comment_row_keeps_parent() {
        let row = json!({
            "id": "c-1",
            "content": "nice",
            "created_at": "2024-03-01T10:00:00Z",
            "author": "u-2",
            "parent": 7
        });

        let post: Post = serde_json::from_value(row).unwrap();
        assert_eq!(post.parent.as_deref(), Some("7"));
        assert_eq!(post.author, "u-2");
    }

    #[test]
    fn test_profile_without_name() {
        let profile: Profile = serde_json::from_value(json!({ "id": "u-3" })).unwrap();
        assert_eq!(profile.display_name(), "Unknown");
        assert!(profile.avatar.is_none());
    }
}
