//! File handling and validation for cli-tree component definitions.
//!
//! This module reads component definitions from YAML and validates usage
//! lines, commands and parameter IDs before any component is built.

use std::collections::HashSet;
use std::fs::File;

use log::warn;

use crate::definitions::ComponentDefinition;
use crate::error::Error::{
    CommandWithChildren, EmptyCommand, EmptyUsage, NonUniqueParameterId, NotFoundParameterId,
    UndeclaredParameter,
};
use crate::error::{Error, Result};
use crate::interpolation::{get_templates, get_tokens};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Reads and validates the component definitions at `path`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file contains invalid YAML or doesn't match the expected structure
/// - The file defines no components
/// - A definition fails validation
pub fn get_component_definitions(path: &str) -> Result<Vec<ComponentDefinition>> {
    let reader = get_reader("component definitions", path)?;

    let definitions: Vec<ComponentDefinition> = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "component definitions".to_string(),
            path.to_string(),
            e,
        )
    })?;

    if definitions.is_empty() {
        return Err(Error::empty_component_definition(path.to_string()));
    }

    validate_definitions(&definitions)?;
    Ok(definitions)
}

/// Validates sibling definitions and, recursively, their children.
///
/// Siblings sharing a name are allowed but only the first runnable one can be
/// invoked, so they are reported with a warning.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate_definitions(definitions: &[ComponentDefinition]) -> Result<()> {
    let mut names = HashSet::new();

    for definition in definitions {
        validate_definition(definition)?;

        if !names.insert(definition.name()) {
            warn!(
                "Component name `{}` is used more than once; \
                 only the first runnable one can be invoked",
                definition.name()
            );
        }

        if let Some(children) = &definition.children {
            validate_definitions(children)?;
        }
    }

    Ok(())
}

fn validate_definition(definition: &ComponentDefinition) -> Result<()> {
    let name = definition.name();
    if name.is_empty() {
        return Err(EmptyUsage);
    }

    let Some(command) = &definition.command else {
        return Ok(());
    };

    if command.is_empty() {
        return Err(EmptyCommand(name.to_string()));
    }

    if definition
        .children
        .as_ref()
        .is_some_and(|children| !children.is_empty())
    {
        return Err(CommandWithChildren(name.to_string()));
    }

    let templates = get_templates(command)?;
    let tokens = get_tokens(&templates);

    let mut parameter_ids = HashSet::new();
    for parameter in definition.parameters.iter().flatten() {
        if !parameter_ids.insert(parameter.id.as_str()) {
            return Err(NonUniqueParameterId(
                name.to_string(),
                parameter.id.clone(),
            ));
        }

        if !tokens.contains(&parameter.id) {
            return Err(NotFoundParameterId(name.to_string(), parameter.id.clone()));
        }
    }

    if let Some(token) = tokens
        .iter()
        .find(|token| !parameter_ids.contains(token.as_str()))
    {
        return Err(UndeclaredParameter(name.to_string(), token.clone()));
    }

    Ok(())
}
