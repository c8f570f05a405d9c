use std::io::{self, Write};

use cli_tree_core::{Component, Context, Result};

use crate::error::Error;

pub const USAGE: &str = "echo [-n] [--sep separator] [words...]";

pub fn component() -> Component {
    let mut component = Component::new(USAGE)
        .with_short("print words")
        .with_long(
            "Echo prints its arguments separated by the separator, followed by a newline.\n\
             Use -- to print words that start with a dash.",
        )
        .with_action(run);
    component
        .flag_set_mut()
        .bool("n", "do not print the trailing newline")
        .string("sep", " ", "separator placed between words");
    component
}

fn run(_: &Context, component: &Component, args: &[String]) -> Result<()> {
    let Some(flags) = component.parse_flags(args)? else {
        return Ok(());
    };

    let separator = flags.string("sep").unwrap_or_default();
    let mut stdout = io::stdout().lock();
    write_words(&mut stdout, flags.args(), &separator, !flags.bool("n")).map_err(Error::Stdio)?;
    Ok(())
}

/// Writes `words` joined by `separator`, optionally newline terminated.
///
/// # Errors
///
/// Returns the IO error of `out`.
pub fn write_words<W: Write>(
    out: &mut W,
    words: &[String],
    separator: &str,
    newline: bool,
) -> io::Result<()> {
    out.write_all(words.join(separator).as_bytes())?;
    if newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_write_words() {
        let mut out = Vec::new();
        write_words(&mut out, &words(&["a", "b"]), " ", true).unwrap();
        assert_eq!(out, b"a b\n");

        let mut out = Vec::new();
        write_words(&mut out, &words(&["a", "b"]), ",", false).unwrap();
        assert_eq!(out, b"a,b");
    }

    #[test]
    fn test_flags() {
        let component = component();
        let error = component
            .flag_set()
            .parse(&words(&["-n", "-sep", ":", "x"]))
            .unwrap_err();
        // multi-letter flags take two dashes
        assert!(error.is_usage_error());

        let flags = component
            .flag_set()
            .parse(&words(&["-n", "--sep", ":", "x", "-y"]))
            .unwrap();
        assert!(flags.bool("n"));
        assert_eq!(flags.string("sep"), Some(":".to_string()));
        assert_eq!(flags.args(), words(&["x", "-y"]).as_slice());
    }

    #[test]
    fn test_default_separator() {
        let flags = component().flag_set().parse(&words(&["x"])).unwrap();
        assert_eq!(flags.string("sep"), Some(" ".to_string()));
        assert!(!flags.bool("n"));
    }
}
