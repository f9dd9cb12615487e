pub mod api_docs;
pub mod app;
pub mod blockchain;
pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod render;
pub mod routes;
pub mod utils;
pub mod viewer;
