pub mod auction;
pub mod backend;
pub mod config;
pub mod handlers;
pub mod store;
pub mod view;
