mod r#trait;
pub mod memory;

pub use memory::InMemoryRefreshTokenStore;
pub use r#trait::RefreshTokenStore;
