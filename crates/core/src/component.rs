//! The component tree.

use std::cell::OnceCell;
use std::fmt::{Debug, Formatter};

use log::debug;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::flags::{FlagSet, ParsedFlags};
use crate::output::Sink;
use crate::usage;

/// What a runnable component does when invoked.
///
/// Receives the execution context, the component itself and the arguments
/// that followed the component's name.
pub type Action = Box<dyn Fn(&Context, &Component, &[String]) -> Result<()>>;

/// A command line component: a command, or a group of subcommands.
///
/// Components own their children. A component with an action is runnable;
/// one without is informational and is never dispatched to.
pub struct Component {
    usage_line: String,
    short: String,
    long: String,
    children: Vec<Component>,
    action: Option<Action>,
    flag_set: OnceCell<FlagSet>,
}

impl Component {
    /// Creates a component from its one-line usage message. The first word
    /// of the line is the component's name.
    pub fn new(usage_line: impl Into<String>) -> Self {
        Self {
            usage_line: usage_line.into(),
            short: String::new(),
            long: String::new(),
            children: Vec::new(),
            action: None,
            flag_set: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    #[must_use]
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Component>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Context, &Component, &[String]) -> Result<()> + 'static,
    {
        self.set_action(action);
        self
    }

    pub fn set_action<F>(&mut self, action: F)
    where
        F: Fn(&Context, &Component, &[String]) -> Result<()> + 'static,
    {
        self.action = Some(Box::new(action));
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    #[must_use]
    pub fn usage_line(&self) -> &str {
        &self.usage_line
    }

    /// The first word of the usage line.
    #[must_use]
    pub fn name(&self) -> &str {
        match self.usage_line.find(' ') {
            Some(index) => &self.usage_line[..index],
            None => &self.usage_line,
        }
    }

    #[must_use]
    pub fn short(&self) -> &str {
        &self.short
    }

    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    #[must_use]
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Whether the component can be run, i.e. has an action.
    #[must_use]
    pub fn runnable(&self) -> bool {
        self.action.is_some()
    }

    /// The first runnable child called `name`.
    ///
    /// Siblings may share a name; the earliest runnable one shadows the rest.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Component> {
        self.children
            .iter()
            .find(|child| child.runnable() && child.name() == name)
    }

    /// The component's flag set, created on first use.
    pub fn flag_set(&self) -> &FlagSet {
        self.flag_set.get_or_init(|| FlagSet::new(self.name()))
    }

    /// Mutable access to the flag set, for registering flags.
    pub fn flag_set_mut(&mut self) -> &mut FlagSet {
        if self.flag_set.get().is_none() {
            self.flag_set = OnceCell::from(FlagSet::new(self.name()));
        }
        match self.flag_set.get_mut() {
            Some(flag_set) => flag_set,
            None => unreachable!("flag set initialised above"),
        }
    }

    /// Redirects usage output. `None` restores standard error.
    pub fn set_output(&self, sink: Option<Sink>) {
        self.flag_set().set_output(sink);
    }

    /// Renders the usage text without writing it anywhere.
    ///
    /// # Errors
    ///
    /// Returns an error if a usage template fails to parse or render.
    pub fn render_usage(&self) -> Result<String> {
        usage::render(self)
    }

    /// Writes the usage text to the component's output in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the output cannot be written.
    pub fn usage(&self) -> Result<()> {
        let text = self.render_usage()?;
        if text.is_empty() {
            return Ok(());
        }

        self.flag_set()
            .write(&text)
            .map_err(|e| Error::output(self.name().to_string(), e))
    }

    /// Parses `args` with the component's flag set, printing usage when the
    /// parse fails or help is requested.
    ///
    /// Returns `Ok(None)` when help was requested; usage has already been
    /// written in that case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Flag`] for unknown flags or malformed values, after
    /// writing the problem and the usage text to the output.
    pub fn parse_flags(&self, args: &[String]) -> Result<Option<ParsedFlags>> {
        match self.flag_set().parse(args) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(Error::Help) => {
                self.usage()?;
                Ok(None)
            }
            Err(Error::Flag { component, message }) => {
                self.flag_set()
                    .write(&format!("{message}\n"))
                    .map_err(|e| Error::output(self.name().to_string(), e))?;
                self.usage()?;
                Err(Error::Flag { component, message })
            }
            Err(e) => Err(e),
        }
    }

    /// Runs the component's action with `args`, or prints usage when the
    /// component is not runnable.
    ///
    /// # Errors
    ///
    /// Propagates whatever the action returns.
    pub fn run(&self, context: &Context, args: &[String]) -> Result<()> {
        match &self.action {
            Some(action) => {
                debug!("Running `{}` with {:?}", self.name(), args);
                action(context, self, args)
            }
            None => self.usage(),
        }
    }
}

impl Debug for Component {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Component")
            .field("usage_line", &self.usage_line)
            .field("short", &self.short)
            .field("runnable", &self.runnable())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::output::Capture;

    const USAGE_LINE: &str = "test [-i input]";

    #[test]
    fn test_name() {
        assert_eq!(Component::new(USAGE_LINE).name(), "test");
        assert_eq!(Component::new("single").name(), "single");
        assert_eq!(Component::new("").name(), "");
        assert_eq!(Component::new(" leading").name(), "");
    }

    #[test]
    fn test_runnable() {
        assert!(!Component::new(USAGE_LINE).runnable());
        assert!(Component::new(USAGE_LINE)
            .with_action(|_, _, _| Ok(()))
            .runnable());
    }

    #[test]
    fn test_set_output() {
        let component = Component::new(USAGE_LINE);
        assert!(component.flag_set().output().is_stderr());

        let capture = Capture::new();
        component.set_output(Some(capture.sink()));
        assert!(!component.flag_set().output().is_stderr());

        component.set_output(None);
        assert!(component.flag_set().output().is_stderr());
    }

    #[test]
    fn test_flag_set_is_created_once() {
        let mut component = Component::new(USAGE_LINE);
        assert_eq!(component.flag_set().name(), "test");

        component.flag_set_mut().bool("v", "verbose");
        assert_eq!(component.flag_set().len(), 1);
        assert!(std::ptr::eq(component.flag_set(), component.flag_set()));
    }

    #[test]
    fn test_flag_set_mut_initialises_flag_set() {
        let mut component = Component::new(USAGE_LINE);
        component.flag_set_mut().bool("v", "verbose");
        component.flag_set_mut().bool("q", "quiet");

        assert_eq!(component.flag_set().name(), "test");
        assert_eq!(component.flag_set().len(), 2);
    }

    #[test]
    fn test_usage_without_action() {
        let capture = Capture::new();
        let component = Component::new(USAGE_LINE)
            .with_long("This is the long description of the test component.");
        component.set_output(Some(capture.sink()));

        component.usage().unwrap();
        assert!(!capture.contents().starts_with("Usage: test [-i input]"));
        assert_eq!(
            capture.contents(),
            "This is the long description of the test component.\n"
        );
    }

    #[test]
    fn test_usage_with_action() {
        let capture = Capture::new();
        let mut component = Component::new(USAGE_LINE);
        component.set_output(Some(capture.sink()));
        component.set_action(|_, _, _| Ok(()));

        component.usage().unwrap();
        assert_eq!(capture.contents(), "Usage: test [-i input]\n");
    }

    #[test]
    fn test_child_lookup_skips_informational() {
        let component = Component::new("top")
            .with_child(Component::new("dup").with_short("informational"))
            .with_child(
                Component::new("dup")
                    .with_short("first runnable")
                    .with_action(|_, _, _| Ok(())),
            )
            .with_child(
                Component::new("dup")
                    .with_short("second runnable")
                    .with_action(|_, _, _| Ok(())),
            );

        assert_eq!(component.child("dup").unwrap().short(), "first runnable");
        assert!(component.child("DUP").is_none());
        assert!(component.child("missing").is_none());
    }

    #[test]
    fn test_parse_flags_help_prints_usage() {
        let capture = Capture::new();
        let component = Component::new(USAGE_LINE).with_action(|_, _, _| Ok(()));
        component.set_output(Some(capture.sink()));

        let parsed = component.parse_flags(&["-h".to_string()]).unwrap();
        assert!(parsed.is_none());
        assert_eq!(capture.contents(), "Usage: test [-i input]\n");
    }

    #[test]
    fn test_parse_flags_error_prints_message_and_usage() {
        let capture = Capture::new();
        let component = Component::new(USAGE_LINE).with_action(|_, _, _| Ok(()));
        component.set_output(Some(capture.sink()));

        let result = component.parse_flags(&["-x".to_string()]);
        assert!(matches!(result, Err(Error::Flag { .. })));

        let output = capture.contents();
        assert!(output.contains("-x"));
        assert!(output.ends_with("Usage: test [-i input]\n"));
    }

    #[test]
    fn test_run_invokes_action() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let component = Component::new(USAGE_LINE).with_action(move |_, component, args| {
            assert_eq!(component.name(), "test");
            assert_eq!(args, ["a".to_string()]);
            counter.set(counter.get() + 1);
            Ok(())
        });

        component.run(&Context::new(), &["a".to_string()]).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_run_informational_prints_usage() {
        let capture = Capture::new();
        let component = Component::new(USAGE_LINE).with_long("Informational.");
        component.set_output(Some(capture.sink()));

        component.run(&Context::new(), &[]).unwrap();
        assert_eq!(capture.contents(), "Informational.\n");
    }
}
