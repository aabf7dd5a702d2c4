//! Integration tests

mod helpers;

mod cli_test;
mod config_test;
mod sessions_test;
mod sync_test;
