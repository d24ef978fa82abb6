pub mod cache;
pub mod cli;
pub mod error;
pub mod filter;
pub mod github;
pub mod models;
pub mod normalize;
pub mod query;
pub mod render;
pub mod schema;
pub mod security;
pub mod server;
pub mod site;
pub mod types;
