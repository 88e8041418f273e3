mod client;
mod errors;
mod query;
mod slug;
pub mod types;
mod user_agent;
pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{ListingQuery, Query};
pub use self::slug::company_slug;
pub use self::user_agent::get_user_agent;
