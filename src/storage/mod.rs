pub mod backends;
pub mod token_store;

pub use backends::{FileStorage, MemoryStorage, Storage};
pub use token_store::{TokenStore, CURRENT_QUESTION_KEY, TOKEN_KEY};
