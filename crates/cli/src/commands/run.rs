use std::env;

use cli_tree_core::{passthrough, Component, Context, Result};
use log::debug;

use crate::config::{get_config_path, CONFIG_PATH_ENV_VAR};
use crate::definitions::ComponentDefinition;
use crate::file_handling::get_component_definitions;

pub const USAGE: &str = "run [-c config] <component> [arguments]";

const TREE_USAGE: &str = "run <component> [arguments]";

pub fn component() -> Component {
    let mut component = Component::new(USAGE)
        .with_short("run a component from the definitions file")
        .with_long(
            "Run loads user-defined components from a YAML file and runs the one named\n\
             by the first argument. The file is read from -c, else from the\n\
             CLI_TREE_CONFIG environment variable, else from ~/.cli-tree/components.yml.",
        )
        .with_action(run);
    component
        .flag_set_mut()
        .string("c", "", "path to the component definitions file");
    component
}

fn run(context: &Context, component: &Component, args: &[String]) -> Result<()> {
    let Some(flags) = component.parse_flags(args)? else {
        return Ok(());
    };

    let config_path = get_config_path(
        flags
            .string("c")
            .or_else(|| env::var(CONFIG_PATH_ENV_VAR).ok())
            .as_deref(),
    );
    debug!("Component definitions path: `{}`", config_path);

    let definitions = get_component_definitions(&config_path)?;
    let tree = build_tree(definitions);
    passthrough(context, &tree, flags.args())
}

/// The dispatch node listing the user-defined components.
pub fn build_tree(definitions: Vec<ComponentDefinition>) -> Component {
    Component::new(TREE_USAGE)
        .with_action(passthrough)
        .with_children(
            definitions
                .into_iter()
                .map(ComponentDefinition::into_component),
        )
}
