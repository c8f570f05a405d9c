//! CLI Tree Command Line Library
//!
//! This crate provides `ct`, a command line tool assembled from
//! `cli-tree-core` components. Besides a few built-in components it can run
//! user-defined components described in a YAML file.
//!
//! # Architecture
//!
//! - [`commands`]: The built-in component tree
//! - [`definitions`]: User-defined components and the commands they run
//! - [`file_handling`]: Loading and validating the definitions file
//! - [`interpolation`]: Filling `{parameter}` placeholders from arguments
//! - [`execution`]: Spawning processes under a cancellation context
//!
//! # Examples
//!
//! ```bash
//! # List components
//! ct
//!
//! # Built-in components
//! ct echo -n hello world
//! ct sleep --ms 500
//!
//! # User-defined components from ~/.cli-tree/components.yml
//! ct run deploy staging
//! ct run -c ./components.yml db dump
//! ```

pub mod commands;
pub mod config;
pub mod definitions;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;

/// Process exit status for the outcome of running the root component.
///
/// Flag errors exit with 2, cancellation with 130 and any other failure
/// with 1.
#[must_use]
pub fn exit_status(result: &cli_tree_core::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(cli_tree_core::Error::Flag { .. }) => 2,
        Err(cli_tree_core::Error::Cancelled) => 130,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);
        assert_eq!(
            exit_status(&Err(cli_tree_core::Error::flag(
                "ct".to_string(),
                "flag provided but not defined: -x".to_string()
            ))),
            2
        );
        assert_eq!(exit_status(&Err(cli_tree_core::Error::Cancelled)), 130);
        assert_eq!(
            exit_status(&Err(cli_tree_core::Error::action("failed"))),
            1
        );
    }
}
