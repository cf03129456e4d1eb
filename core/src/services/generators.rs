//! Random value and identifier generation.

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

/// Produces opaque, unguessable strings for refresh token values
pub trait SecureRandomGenerator: Send + Sync {
    /// Draw `byte_length` random bytes and encode them as a string
    fn generate(&self, byte_length: usize) -> String;
}

/// Hex-encoded bytes from the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomGenerator;

impl SecureRandomGenerator for OsRandomGenerator {
    fn generate(&self, byte_length: usize) -> String {
        let mut bytes = vec![0u8; byte_length];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Produces unique identifiers for token records
pub trait IdGenerator: Send + Sync {
    fn create(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn create(&self) -> Uuid {
        Uuid::new_v4()
    }
}
