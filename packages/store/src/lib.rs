pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod remote;

mod memory;
pub use memory::MemoryStore;

pub use config::BackendConfig;
pub use error::StoreError;
pub use models::{Like, Post, PostWithAuthor, Profile, SavedPost};
pub use query::{Embed, Filter, Order, Select, Table};
pub use remote::RemoteStore;
