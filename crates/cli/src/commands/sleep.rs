use std::thread;
use std::time::{Duration, Instant};

use cli_tree_core::{Component, Context, Result};

pub const USAGE: &str = "sleep [--ms milliseconds]";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn component() -> Component {
    let mut component = Component::new(USAGE)
        .with_short("wait, stopping early on Ctrl-C")
        .with_action(run);
    component
        .flag_set_mut()
        .uint("ms", 1000, "how long to wait, in milliseconds");
    component
}

fn run(context: &Context, component: &Component, args: &[String]) -> Result<()> {
    let Some(flags) = component.parse_flags(args)? else {
        return Ok(());
    };

    wait(context, Duration::from_millis(flags.uint("ms").unwrap_or_default()))
}

/// Blocks for `duration` or until `context` is cancelled.
///
/// # Errors
///
/// Returns [`cli_tree_core::Error::Cancelled`] if the context is cancelled
/// first.
pub fn wait(context: &Context, duration: Duration) -> Result<()> {
    let deadline = Instant::now() + duration;
    loop {
        context.check()?;

        let now = Instant::now();
        if now >= deadline {
            return Ok(());
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}
