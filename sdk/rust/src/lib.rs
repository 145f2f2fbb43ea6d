pub mod client;

pub use client::{ConfigClient, ConfigUpdateStatus};
