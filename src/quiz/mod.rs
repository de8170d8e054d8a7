pub mod code_generator;
pub mod db;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod store;
