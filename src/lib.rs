#![forbid(unsafe_code)]

pub mod api;
pub mod app;
pub mod book;
pub mod cli;
pub mod form;
pub mod logging;
pub mod selection;
pub mod shell;
pub mod table;
