pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::Customer;
pub use repository::{CustomerStore, PgCustomerRepository};
