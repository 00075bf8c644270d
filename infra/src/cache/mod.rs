//! Cache module for Redis-based revocation state
//!
//! This module provides the Redis client with retry and deadline handling,
//! and the session store that records revoked tokens in Redis.

pub mod redis_client;
pub mod session_store;


pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use fg_shared::CacheConfig;
