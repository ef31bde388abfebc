pub mod diff;
pub mod message;
pub mod repository;
