#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod fakes;

pub use app_builder::create_test_app;
