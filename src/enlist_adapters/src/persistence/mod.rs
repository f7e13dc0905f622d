pub mod configured_ttl_store;
pub mod configured_user_store;
pub mod hashmap_user_store;
pub mod in_memory_ttl_store;
pub mod password_hashing;
pub mod postgres_user_store;
pub mod redis_ttl_store;

pub use configured_ttl_store::ConfiguredTtlStore;
pub use configured_user_store::ConfiguredUserStore;
pub use hashmap_user_store::HashMapUserStore;
pub use in_memory_ttl_store::InMemoryTtlStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_ttl_store::RedisTtlStore;
