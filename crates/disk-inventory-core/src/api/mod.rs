pub mod client;
pub mod filter;

pub use client::{DiskApi, DiskPage};
pub use filter::DiskFilter;
