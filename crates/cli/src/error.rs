use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exiting with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No components were found in the component definition YAML. Is `{}` empty?", .path)]
    EmptyComponentDefinition { path: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing placeholder string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error placeholder template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),

    #[error("Invalid component: usage line may not be empty or start with a space")]
    EmptyUsage,

    #[error("Component `{}` has an empty command", .0)]
    EmptyCommand(String),

    #[error("Component `{}` has both a command and children; its children could never run", .0)]
    CommandWithChildren(String),

    #[error("Found a non-unique parameter ID on component {}: `{}`", .0, .1)]
    NonUniqueParameterId(String, String),

    #[error("Found a parameter with ID that is not present in component {}: `{}`", .0, .1)]
    NotFoundParameterId(String, String),

    #[error("Placeholder `{}` of component {} has no parameter definition", .1, .0)]
    UndeclaredParameter(String, String),

    #[error("No value given for parameter `{}` and it has no default", .0)]
    MissingParameter(String),

    #[error(transparent)]
    Component(#[from] cli_tree_core::Error),
}

impl Error {
    pub fn empty_component_definition(path: String) -> Self {
        Self::EmptyComponentDefinition { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

/// Lets component actions written against this crate's errors use `?`.
impl From<Error> for cli_tree_core::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Component(inner) => inner,
            other => cli_tree_core::Error::action(other),
        }
    }
}
