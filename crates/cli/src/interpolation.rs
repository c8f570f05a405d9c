use std::collections::{HashMap, HashSet};

use leon::Template;

use crate::definitions::ParameterDefinition;
use crate::error::{Error, Result};

/// Parameter values bound from positional arguments, plus the arguments left
/// over once every parameter has a value.
#[derive(Debug, Default, PartialEq)]
pub struct Bindings {
    pub values: HashMap<String, String>,
    pub rest: Vec<String>,
}

/// Binds positional arguments to parameters in declaration order.
///
/// Parameters without an argument fall back to their default.
///
/// # Errors
///
/// Returns [`Error::MissingParameter`] for a parameter with neither an
/// argument nor a default.
pub fn bind_parameters(parameters: &[ParameterDefinition], args: &[String]) -> Result<Bindings> {
    let mut values = HashMap::new();
    let mut args = args.iter();

    for parameter in parameters {
        let value = match args.next() {
            Some(value) => value.clone(),
            None => parameter
                .default
                .clone()
                .ok_or_else(|| Error::MissingParameter(parameter.id.clone()))?,
        };
        values.insert(parameter.id.clone(), value);
    }

    Ok(Bindings {
        values,
        rest: args.cloned().collect(),
    })
}

/// Find all tokens in all arguments of templates of command.
pub fn get_tokens(templates: &[Template]) -> HashSet<String> {
    let mut tokens = HashSet::new();

    for template in templates {
        for key in template.keys() {
            let _ = tokens.insert((*key).to_string());
        }
    }

    tokens
}

pub fn get_templates(command: &[String]) -> Result<Vec<Template<'_>>> {
    let mut templates: Vec<Template> = Vec::new();

    for argument in command {
        templates.push(Template::parse(argument.as_ref())?);
    }

    Ok(templates)
}

pub fn interpolate_command(
    context: &HashMap<String, String>,
    templates: &[Template],
) -> Result<Vec<String>> {
    let mut interpolated_arguments: Vec<String> = Vec::new();

    for template in templates {
        interpolated_arguments.push(template.render(context)?);
    }

    Ok(interpolated_arguments)
}
