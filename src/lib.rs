pub mod api_connection;
pub mod catalog;
pub mod chef_chat;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod headless;
pub mod logging;
pub mod recipe;
pub mod recipe_generator;
pub mod tui;
