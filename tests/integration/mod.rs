//! Integration tests for the training log

mod cli_commands;
mod import_export;
mod registry_naming;
mod sled_store;
