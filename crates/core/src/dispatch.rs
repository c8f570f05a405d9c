use log::debug;

use crate::component::Component;
use crate::context::Context;
use crate::error::Result;

/// Action for components that only route to their children.
///
/// Parses the component's own flags, then hands the remaining arguments minus
/// the first to the runnable child named by the first. Falls back to printing
/// usage when no child is named or the name matches no runnable child. A help
/// request prints usage and returns `Ok(())`.
///
/// ```
/// use cli_tree_core::{passthrough, Component, Context};
///
/// let root = Component::new("tool <component> [arguments]")
///     .with_action(passthrough)
///     .with_child(
///         Component::new("hello")
///             .with_short("say hello")
///             .with_action(|_, _, _| Ok(())),
///     );
///
/// root.run(&Context::new(), &["hello".to_string()])?;
/// # Ok::<(), cli_tree_core::Error>(())
/// ```
///
/// # Errors
///
/// Returns flag errors from parsing and whatever the selected child returns.
pub fn passthrough(context: &Context, component: &Component, args: &[String]) -> Result<()> {
    let Some(parsed) = component.parse_flags(args)? else {
        return Ok(());
    };

    let Some((name, rest)) = parsed.args().split_first() else {
        debug!("No component given to `{}`", component.name());
        return component.usage();
    };

    match component.child(name) {
        Some(child) => {
            debug!("Dispatching `{}` -> `{}`", component.name(), name);
            child.run(context, rest)
        }
        None => {
            debug!(
                "No runnable component `{}` under `{}`",
                name,
                component.name()
            );
            component.usage()
        }
    }
}
