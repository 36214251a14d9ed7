pub mod connection;
pub mod main;
