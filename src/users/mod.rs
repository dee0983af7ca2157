mod repo;
mod repo_types;

pub use repo::{InMemoryUserStore, StoreError, UserStore};
pub use repo_types::{NewUser, User};
