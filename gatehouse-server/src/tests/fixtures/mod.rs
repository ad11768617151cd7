pub mod user_fixtures;

pub use user_fixtures::{MemoryUserStore, TEST_TOKEN_SECRET, test_state};
