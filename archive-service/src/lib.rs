pub mod config;
pub mod models;
pub mod services;
pub mod startup;
pub mod storage;

pub use startup::Archive;
