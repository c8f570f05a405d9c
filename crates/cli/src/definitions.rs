//! User-defined components loaded from YAML.
//!
//! A definition with a `command` becomes a leaf that runs it, one with only
//! `children` routes to them, and one with neither is informational.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::process::Command;

use cli_tree_core::{passthrough, Component, Context};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::expand_working_directory;
use crate::error::{Error, Result};
use crate::execution::execute_command;
use crate::interpolation::{bind_parameters, get_templates, interpolate_command};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ParameterDefinition {
    pub id: String,
    pub default: Option<String>,
    pub description: Option<String>,
}

impl Display for ParameterDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        // Always show the id
        write!(formatter, "`{}`", self.id)?;

        // Add description if present
        if let Some(desc) = &self.description {
            write!(formatter, " ({})", desc)?;
        }

        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ComponentDefinition {
    pub usage: String,
    pub short: Option<String>,
    pub long: Option<String>,
    pub command: Option<Vec<String>>,
    pub parameters: Option<Vec<ParameterDefinition>>,
    pub working_directory: Option<String>,
    pub environment: Option<HashMap<String, String>>,
    pub children: Option<Vec<ComponentDefinition>>,
}

impl ComponentDefinition {
    /// The first word of the usage line, as the built component will report.
    pub fn name(&self) -> &str {
        self.usage.split(' ').next().unwrap_or_default()
    }

    /// Builds the component tree described by this definition.
    pub fn into_component(self) -> Component {
        let name = self.name().to_string();
        let long = self.long.unwrap_or_default();
        let long = match &self.parameters {
            Some(parameters) if !parameters.is_empty() => {
                let listing: Vec<String> = parameters.iter().map(ToString::to_string).collect();
                format!("{}\n\nParameters: {}", long.trim(), listing.join(", "))
            }
            _ => long,
        };

        let mut component = Component::new(self.usage)
            .with_short(self.short.unwrap_or_default())
            .with_long(long);

        let children = self.children.unwrap_or_default();
        match self.command {
            Some(command) => {
                let template = CommandTemplate {
                    name,
                    command,
                    parameters: self.parameters.unwrap_or_default(),
                    working_directory: self.working_directory,
                    environment: self.environment,
                };
                component.set_action(move |context, component, args| {
                    let Some(flags) = component.parse_flags(args)? else {
                        return Ok(());
                    };
                    Ok(template.execute(context, flags.args())?)
                });
            }
            None if !children.is_empty() => component.set_action(passthrough),
            None => {}
        }

        component.with_children(children.into_iter().map(ComponentDefinition::into_component))
    }
}

impl Display for ComponentDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.short {
            Some(short) => write!(formatter, "{} ({})", self.name(), short),
            None => formatter.write_str(self.name()),
        }
    }
}

/// A command line with `{parameter}` placeholders, ready to be filled from
/// positional arguments and run.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    pub name: String,
    pub command: Vec<String>,
    pub parameters: Vec<ParameterDefinition>,
    pub working_directory: Option<String>,
    pub environment: Option<HashMap<String, String>>,
}

impl CommandTemplate {
    /// The argument vector for `args`: placeholders filled in order, then
    /// any remaining arguments appended.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter has no value or a placeholder cannot be
    /// rendered.
    pub fn render(&self, args: &[String]) -> Result<Vec<String>> {
        let bindings = bind_parameters(&self.parameters, args)?;
        let templates = get_templates(&self.command)?;

        let mut rendered = interpolate_command(&bindings.values, &templates)?;
        rendered.extend(bindings.rest);
        Ok(rendered)
    }

    /// Renders and runs the command.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails, the command is empty, or the
    /// process fails, exits unsuccessfully or is cancelled.
    pub fn execute(&self, context: &Context, args: &[String]) -> Result<()> {
        context.check()?;

        let rendered = self.render(args)?;
        let Some((program, arguments)) = rendered.split_first() else {
            return Err(Error::EmptyCommand(self.name.clone()));
        };

        let mut command = Command::new(program);
        command.args(arguments);
        if let Some(working_directory) =
            expand_working_directory(self.working_directory.as_deref())
        {
            command.current_dir(working_directory);
        }

        info!("Executing command: {}", rendered.join(" "));
        execute_command(context, command, self.environment.clone())
    }
}
