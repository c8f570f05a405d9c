//! Component-scoped flag sets.
//!
//! A [`FlagSet`] is a thin adapter over a `clap` builder command. Flags are
//! registered by name, typed, with a default and a help line. Parsing stops at
//! the first positional argument: it and everything after it, flags included,
//! become the positional remainder handed to the next component.
//!
//! Single character names are given as `-x`, longer names as `--name`.

use std::cell::{Ref, RefCell};
use std::io;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::warn;

use crate::error::{Error, Result};
use crate::output::Sink;

const HELP_ID: &str = "flagset:help";
const REMAINDER_ID: &str = "flagset:remainder";
const RESERVED_NAMES: [&str; 2] = ["h", "help"];

#[derive(Debug)]
pub struct FlagSet {
    name: String,
    flags: Vec<Arg>,
    output: RefCell<Sink>,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
            output: RefCell::new(Sink::default()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a string flag. An empty default means the flag has no value
    /// unless given.
    pub fn string(&mut self, name: &str, default: &str, usage: &str) -> &mut Self {
        let mut arg = Arg::new(name.to_string())
            .value_name("string")
            .value_parser(value_parser!(String))
            .allow_hyphen_values(true)
            .action(ArgAction::Set);
        if !default.is_empty() {
            arg = arg.default_value(default.to_string());
        }
        self.define(name, usage, arg)
    }

    /// Registers a boolean switch, false unless present.
    pub fn bool(&mut self, name: &str, usage: &str) -> &mut Self {
        let arg = Arg::new(name.to_string()).action(ArgAction::SetTrue);
        self.define(name, usage, arg)
    }

    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> &mut Self {
        let arg = Arg::new(name.to_string())
            .value_name("int")
            .value_parser(value_parser!(i64))
            .allow_hyphen_values(true)
            .action(ArgAction::Set)
            .default_value(default.to_string())
            .hide_default_value(default == 0);
        self.define(name, usage, arg)
    }

    pub fn uint(&mut self, name: &str, default: u64, usage: &str) -> &mut Self {
        let arg = Arg::new(name.to_string())
            .value_name("uint")
            .value_parser(value_parser!(u64))
            .allow_hyphen_values(true)
            .action(ArgAction::Set)
            .default_value(default.to_string())
            .hide_default_value(default == 0);
        self.define(name, usage, arg)
    }

    pub fn float(&mut self, name: &str, default: f64, usage: &str) -> &mut Self {
        let arg = Arg::new(name.to_string())
            .value_name("float")
            .value_parser(value_parser!(f64))
            .allow_hyphen_values(true)
            .action(ArgAction::Set)
            .default_value(default.to_string())
            .hide_default_value(default == 0.0);
        self.define(name, usage, arg)
    }

    fn define(&mut self, name: &str, usage: &str, arg: Arg) -> &mut Self {
        if name.is_empty() || name.starts_with('-') || RESERVED_NAMES.contains(&name) {
            warn!("Ignoring flag `{}` on `{}`: invalid or reserved name", name, self.name);
            return self;
        }

        let mut chars = name.chars();
        let arg = match (chars.next(), chars.next()) {
            (Some(short), None) => arg.short(short),
            _ => arg.long(name.to_string()),
        }
        .help(usage.to_string());

        if let Some(existing) = self
            .flags
            .iter_mut()
            .find(|flag| flag.get_id().as_str() == name)
        {
            warn!("Flag `{}` redefined on `{}`", name, self.name);
            *existing = arg;
        } else {
            self.flags.push(arg);
        }

        self
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    fn command(&self) -> Command {
        Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .term_width(0)
            .help_template("{options}")
            .args(self.flags.iter().cloned())
            .arg(
                Arg::new(HELP_ID)
                    .short('h')
                    .long("help")
                    .action(ArgAction::Help)
                    .hide(true),
            )
            .arg(
                Arg::new(REMAINDER_ID)
                    .value_parser(value_parser!(String))
                    .num_args(1..)
                    .trailing_var_arg(true)
                    .hide(true),
            )
    }

    /// Parses `args`, which must not include the component's own name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Help`] when `-h` or `--help` is given before the first
    /// positional argument and [`Error::Flag`] for unknown flags or bad
    /// values. Nothing is written to the output; see
    /// `Component::parse_flags` for the variant that prints usage.
    pub fn parse(&self, args: &[String]) -> Result<ParsedFlags> {
        match self.command().try_get_matches_from(args) {
            Ok(matches) => {
                let args = matches
                    .get_many::<String>(REMAINDER_ID)
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                Ok(ParsedFlags { matches, args })
            }
            Err(error) if error.kind() == ErrorKind::DisplayHelp => Err(Error::Help),
            Err(error) => Err(Error::flag(self.name.clone(), describe(&error))),
        }
    }

    /// The default listing of registered flags: one entry per flag with its
    /// name, type hint, default and help text. Empty when no flag is
    /// registered, otherwise newline terminated.
    #[must_use]
    pub fn defaults(&self) -> String {
        if self.flags.is_empty() {
            return String::new();
        }

        let rendered = self.command().render_help().to_string();
        let listing = rendered.trim_end().trim_start_matches('\n');
        if listing.is_empty() {
            String::new()
        } else {
            format!("{listing}\n")
        }
    }

    /// Redirects output. `None` restores the default, standard error.
    pub fn set_output(&self, sink: Option<Sink>) {
        *self.output.borrow_mut() = sink.unwrap_or_default();
    }

    #[must_use]
    pub fn output(&self) -> Ref<'_, Sink> {
        self.output.borrow()
    }

    /// Writes `text` to the configured output.
    ///
    /// # Errors
    ///
    /// Returns the IO error of the underlying sink.
    pub fn write(&self, text: &str) -> io::Result<()> {
        self.output.borrow_mut().write_text(text)
    }
}

/// Flag values and positional remainder of one parse.
#[derive(Debug, Clone)]
pub struct ParsedFlags {
    matches: ArgMatches,
    args: Vec<String>,
}

impl ParsedFlags {
    /// Positional arguments left after the flags.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    #[must_use]
    pub fn string(&self, name: &str) -> Option<String> {
        self.value::<String>(name)
    }

    #[must_use]
    pub fn bool(&self, name: &str) -> bool {
        self.value::<bool>(name).unwrap_or(false)
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.value::<i64>(name)
    }

    #[must_use]
    pub fn uint(&self, name: &str) -> Option<u64> {
        self.value::<u64>(name)
    }

    #[must_use]
    pub fn float(&self, name: &str) -> Option<f64> {
        self.value::<f64>(name)
    }

    fn value<T: Clone + Send + Sync + 'static>(&self, name: &str) -> Option<T> {
        self.matches.try_get_one::<T>(name).ok().flatten().cloned()
    }
}

fn context_string(error: &clap::Error, kind: ContextKind) -> Option<String> {
    match error.get(kind) {
        Some(ContextValue::String(value)) => Some(value.clone()),
        _ => None,
    }
}

fn describe(error: &clap::Error) -> String {
    let argument = context_string(error, ContextKind::InvalidArg);
    let value = context_string(error, ContextKind::InvalidValue);

    match (error.kind(), argument, value) {
        (ErrorKind::UnknownArgument, Some(argument), _) => {
            format!("flag provided but not defined: {argument}")
        }
        (ErrorKind::InvalidValue | ErrorKind::ValueValidation, Some(argument), Some(value))
            if !value.is_empty() =>
        {
            format!("invalid value \"{value}\" for flag {argument}")
        }
        (ErrorKind::InvalidValue | ErrorKind::ValueValidation, Some(argument), _) => {
            format!("flag needs an argument: {argument}")
        }
        (kind, _, _) => kind.as_str().unwrap_or("invalid arguments").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_stops_at_first_positional() {
        let mut flags = FlagSet::new("test");
        flags.string("i", "", "input of the test component");

        let parsed = flags.parse(&args(&["-i", "in.txt", "sub", "-x", "y"])).unwrap();
        assert_eq!(parsed.string("i"), Some("in.txt".to_string()));
        assert_eq!(parsed.args(), args(&["sub", "-x", "y"]).as_slice());
    }

    #[test]
    fn test_parse_without_arguments() {
        let flags = FlagSet::new("test");
        let parsed = flags.parse(&[]).unwrap();
        assert!(parsed.args().is_empty());
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let mut flags = FlagSet::new("test");
        flags.bool("v", "verbose");

        let parsed = flags.parse(&args(&["--", "-v"])).unwrap();
        assert!(!parsed.bool("v"));
        assert_eq!(parsed.into_args(), args(&["-v"]));
    }

    #[test]
    fn test_help_is_distinguished() {
        let flags = FlagSet::new("test");
        assert!(matches!(flags.parse(&args(&["-h"])), Err(Error::Help)));
        assert!(matches!(flags.parse(&args(&["--help"])), Err(Error::Help)));
    }

    #[test]
    fn test_help_after_positional_is_remainder() {
        let flags = FlagSet::new("test");
        let parsed = flags.parse(&args(&["sub", "-h"])).unwrap();
        assert_eq!(parsed.args(), args(&["sub", "-h"]).as_slice());
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let flags = FlagSet::new("test");
        match flags.parse(&args(&["-x"])) {
            Err(Error::Flag { component, message }) => {
                assert_eq!(component, "test");
                assert!(message.contains("-x"));
            }
            other => panic!("Expected flag error, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_values_and_defaults() {
        let mut flags = FlagSet::new("test");
        flags
            .int("n", 3, "count")
            .uint("retries", 0, "retry count")
            .float("ratio", 0.5, "ratio")
            .bool("v", "verbose")
            .string("name", "world", "who to greet");

        let parsed = flags.parse(&args(&["-n", "-7", "--retries", "2", "-v"])).unwrap();
        assert_eq!(parsed.int("n"), Some(-7));
        assert_eq!(parsed.uint("retries"), Some(2));
        assert_eq!(parsed.float("ratio"), Some(0.5));
        assert!(parsed.bool("v"));
        assert_eq!(parsed.string("name"), Some("world".to_string()));
        assert_eq!(parsed.string("missing"), None);
    }

    #[test]
    fn test_repeated_flag_last_value_wins() {
        let mut flags = FlagSet::new("test");
        flags.string("i", "", "input of the test component");

        let parsed = flags.parse(&args(&["-i", "a", "-i", "b", "sub"])).unwrap();
        assert_eq!(parsed.string("i"), Some("b".to_string()));
        assert_eq!(parsed.args(), args(&["sub"]).as_slice());
    }

    #[test]
    fn test_repeated_switch() {
        let mut flags = FlagSet::new("test");
        flags.bool("v", "verbose");

        let parsed = flags.parse(&args(&["-v", "-v", "sub"])).unwrap();
        assert!(parsed.bool("v"));
        assert_eq!(parsed.into_args(), args(&["sub"]));
    }

    #[test]
    fn test_value_may_start_with_hyphen() {
        let mut flags = FlagSet::new("test");
        flags.string("i", "", "input of the test component");

        let parsed = flags.parse(&args(&["-i", "-foo", "sub"])).unwrap();
        assert_eq!(parsed.string("i"), Some("-foo".to_string()));
        assert_eq!(parsed.args(), args(&["sub"]).as_slice());
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let mut flags = FlagSet::new("test");
        flags.int("n", 0, "count");
        assert!(matches!(
            flags.parse(&args(&["-n", "abc"])),
            Err(Error::Flag { .. })
        ));
    }

    #[test]
    fn test_redefinition_replaces_flag() {
        let mut flags = FlagSet::new("test");
        flags.string("i", "", "first");
        flags.string("i", "", "second");
        assert_eq!(flags.len(), 1);
        assert!(flags.defaults().contains("second"));
        assert!(!flags.defaults().contains("first"));
    }

    #[test]
    fn test_reserved_names_are_ignored() {
        let mut flags = FlagSet::new("test");
        flags.bool("h", "shadow help").bool("help", "shadow help").bool("", "empty");
        assert!(flags.is_empty());
    }

    #[test]
    fn test_defaults_lists_registered_flags() {
        let mut flags = FlagSet::new("test");
        assert_eq!(flags.defaults(), "");

        flags.string("i", "", "input of the test component");
        let defaults = flags.defaults();
        assert!(defaults.contains("-i"));
        assert!(defaults.contains("input of the test component"));
        assert!(!defaults.contains("--help"));
        assert!(defaults.ends_with('\n'));
        assert!(!defaults.ends_with("\n\n"));
    }

    #[test]
    fn test_set_output_none_restores_stderr() {
        let flags = FlagSet::new("test");
        assert!(flags.output().is_stderr());

        flags.set_output(Some(Sink::Stdout));
        assert!(!flags.output().is_stderr());

        flags.set_output(None);
        assert!(flags.output().is_stderr());
    }
}
