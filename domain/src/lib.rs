pub mod message;
pub mod models;
pub mod ports;
