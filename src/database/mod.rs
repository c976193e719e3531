pub mod connection;

pub use connection::{create_pool, init_schema, seed_data};
