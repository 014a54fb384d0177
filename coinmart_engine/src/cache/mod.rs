//! Redis backend for the quote cache.
mod redis_cache;

pub use redis_cache::{redis_url, RedisQuoteCache};
