pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod sheet;
pub mod batch;
pub mod remarks;

