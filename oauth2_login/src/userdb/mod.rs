mod errors;
mod memory;
mod postgrest;
mod store;
mod types;

pub use errors::UserError;
pub use memory::InMemoryUserStore;
pub use postgrest::PostgrestUserStore;
pub use store::UserStore;
pub use types::StoredUserRecord;
