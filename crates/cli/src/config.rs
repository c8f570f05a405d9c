//! Configuration path utilities for cli-tree.
//!
//! This module provides functions for resolving the component definition
//! file path and expanding shell variables like `~` in paths.

/// Default path for the component definitions file
const DEFAULT_CONFIG_PATH: &str = "~/.cli-tree/components.yml";

/// Environment variable overriding the default component definitions path
pub const CONFIG_PATH_ENV_VAR: &str = "CLI_TREE_CONFIG";

/// Resolves the component definitions file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use cli_tree_cli::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(None);
///
/// // Use custom path
/// let custom_path = get_config_path(Some("/path/to/components.yml"));
/// assert_eq!(custom_path, "/path/to/components.yml");
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: Option<&str>) -> String {
    let config_path = config_path_arg.unwrap_or(DEFAULT_CONFIG_PATH);

    shellexpand::tilde(config_path).to_string()
}

/// Expands shell variables in a working directory path.
///
/// Returns None if no working directory is provided.
#[must_use]
pub fn expand_working_directory(working_directory: Option<&str>) -> Option<String> {
    working_directory.map(|working_directory| shellexpand::tilde(working_directory).to_string())
}
