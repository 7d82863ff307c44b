//! Offline demo data, used when no hosted backend is configured.

use serde_json::json;
use store::{MemoryStore, Table};

use crate::auth::{AuthUser, Session};

pub const DEMO_USER_ID: &str = "00000000-0000-4000-8000-000000000001";

/// A memory store with a few profiles, posts and reactions.
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.seed(
        Table::Profiles,
        [
            json!({ "id": DEMO_USER_ID, "name": "You", "avatar": null }),
            json!({ "id": "00000000-0000-4000-8000-000000000002", "name": "Ada Lovelace", "avatar": null }),
            json!({ "id": "00000000-0000-4000-8000-000000000003", "name": "Alan Turing", "avatar": null }),
        ],
    );
    store.seed(
        Table::Posts,
        [
            json!({
                "id": "10000000-0000-4000-8000-000000000001",
                "content": "The Analytical Engine weaves algebraic patterns just as the Jacquard loom weaves flowers and leaves.",
                "created_at": "2024-05-01T08:30:00.000000Z",
                "photos": null,
                "author": "00000000-0000-4000-8000-000000000002",
                "parent": null,
            }),
            json!({
                "id": "10000000-0000-4000-8000-000000000002",
                "content": "We can only see a short distance ahead, but we can see plenty there that needs to be done.",
                "created_at": "2024-05-02T17:05:00.000000Z",
                "photos": null,
                "author": "00000000-0000-4000-8000-000000000003",
                "parent": null,
            }),
            json!({
                "id": "10000000-0000-4000-8000-000000000003",
                "content": "Agreed, and the distance keeps growing.",
                "created_at": "2024-05-02T18:00:00.000000Z",
                "photos": null,
                "author": "00000000-0000-4000-8000-000000000002",
                "parent": "10000000-0000-4000-8000-000000000002",
            }),
        ],
    );
    store.seed(
        Table::Likes,
        [json!({
            "id": "20000000-0000-4000-8000-000000000001",
            "post_id": "10000000-0000-4000-8000-000000000002",
            "user_id": "00000000-0000-4000-8000-000000000002",
            "created_at": "2024-05-02T18:01:00.000000Z",
        })],
    );
    store
}

/// The session every demo sign-in produces.
pub fn session(email: &str) -> Session {
    Session {
        access_token: "demo".to_string(),
        refresh_token: None,
        user: AuthUser {
            id: DEMO_USER_ID.to_string(),
            email: Some(email.trim().to_string()),
        },
    }
}
