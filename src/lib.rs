pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod pages;
pub mod persistence;
pub mod visual_editor;
