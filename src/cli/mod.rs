pub mod args;
pub mod context;
