pub mod client;
pub mod config;
pub mod notify;
pub mod poll;
pub mod tracker;
pub mod validate;

pub use client::{FetchError, ReviewClient};
pub use config::Config;
pub use notify::{Notify, TelegramNotifier};
pub use poll::{poll_loop, PollState};
pub use tracker::{StatusTracker, UnknownStatus};
pub use validate::{validate, HomeworkRecord, ReviewBatch, ValidateError};
