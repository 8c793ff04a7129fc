// Library root: configuration, CLI arguments and the combined analysis run,
// shared by the `slugfest` binary and its tests.

pub mod app;
pub mod cli;
pub mod config;
