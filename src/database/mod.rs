pub mod connection;
pub mod models;
pub mod records;
pub mod setup;
pub mod stores;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use stores::SemesterStores;
