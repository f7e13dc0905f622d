pub mod repositories;
pub mod services;
pub mod ttl_store;
