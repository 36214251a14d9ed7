pub mod connection;
pub mod display;
pub mod input;
pub mod main;
