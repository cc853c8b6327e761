pub mod collection;
pub mod record;
pub mod utils;

// Re-export handler functions for use in routing
pub use collection::get as customers_get;
pub use collection::post as customers_post;

pub use record::delete as customer_delete;
pub use record::get as customer_get;
pub use record::put as customer_put;
