use std::io::{self, Write};

use cli_tree_core::{Component, Context, Result};

use crate::error::Error;

pub fn component() -> Component {
    Component::new("version")
        .with_short("print the version")
        .with_action(run)
}

fn run(_: &Context, component: &Component, args: &[String]) -> Result<()> {
    if component.parse_flags(args)?.is_none() {
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    write_version(&mut stdout).map_err(Error::Stdio)?;
    Ok(())
}

/// # Errors
///
/// Returns the IO error of `out`.
pub fn write_version<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "ct version {}", env!("CARGO_PKG_VERSION"))
}
