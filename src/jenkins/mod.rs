pub mod aggregate;
mod client;
pub mod console;
mod links;
mod status;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{JenkinsClient, DEFAULT_HISTORY_LIMIT};
pub use links::BuildRef;
pub use status::BuildStatus;
