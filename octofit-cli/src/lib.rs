// Library crate behind the `octofit` binary

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod ui;
pub mod views;
