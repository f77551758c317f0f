pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserStore;
pub use models::UserRecord;
pub use postgres::PgUserStore;
pub use store::{DatabaseError, UserStore};
