pub mod retry;

pub use retry::{connect_with_backoff, BackoffPolicy};
