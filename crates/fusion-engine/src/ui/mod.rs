pub mod commands;
pub mod screens;
pub mod speech;
