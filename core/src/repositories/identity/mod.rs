mod r#trait;
pub mod memory;

pub use memory::InMemoryIdentityResolver;
pub use r#trait::IdentityResolver;
