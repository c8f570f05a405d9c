//! The `ct` component tree.

pub mod echo;
pub mod run;
pub mod sleep;
pub mod version;

use cli_tree_core::{passthrough, Component};

pub const ROOT_USAGE: &str = "ct <component> [arguments]";

const ROOT_LONG: &str = "
Ct is a small tool built from nested components.

Use \"ct <component> -h\" for more information about a component.
";

/// Builds the root component with every built-in component attached.
pub fn root() -> Component {
    Component::new(ROOT_USAGE)
        .with_long(ROOT_LONG)
        .with_action(passthrough)
        .with_children([
            echo::component(),
            run::component(),
            sleep::component(),
            version::component(),
        ])
}
