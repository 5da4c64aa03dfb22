pub mod connection;
pub mod entities;
pub mod schema;

pub use connection::*;
pub use schema::ensure_schema;
