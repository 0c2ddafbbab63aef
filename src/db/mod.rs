// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, default_database_path, get_connection, ConnectionPool, PooledConn,
};

#[cfg(test)]
pub use connection::create_test_pool;

pub use migrations::{initialize_database, verify_database_integrity};
