pub mod identity;
pub mod token;

pub use identity::{IdentityResolver, InMemoryIdentityResolver};
pub use token::{InMemoryRefreshTokenStore, RefreshTokenStore};
