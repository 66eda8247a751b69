//! HTTP plumbing shared by the backend adapters

mod client;

pub use client::{HttpClient, HttpClientBuilder};
