//! MySQL implementations of the `tk_core` store traits

pub mod identity_resolver;
pub mod refresh_token_store;

pub use identity_resolver::MySqlIdentityResolver;
pub use refresh_token_store::MySqlRefreshTokenStore;
