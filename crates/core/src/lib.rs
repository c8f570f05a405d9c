//! CLI Tree Core Library
//!
//! Building blocks for command line applications made of nested components,
//! in the style of the `go` tool: `tool <component> [arguments]`, where a
//! component may itself route to further components.
//!
//! # Key Features
//!
//! - **Components**: A usage line, short and long descriptions, owned children
//!   and an optional action
//! - **Flag Sets**: Typed, component-scoped flags parsed up to the first
//!   positional argument
//! - **Dispatch**: [`passthrough`] routes arguments one name at a time down
//!   the tree
//! - **Usage Rendering**: Help text that adapts to runnable and informational
//!   components
//!
//! # Examples
//!
//! ```
//! use cli_tree_core::{passthrough, Capture, Component, Context};
//!
//! let mut greet = Component::new("greet [-name name]")
//!     .with_short("print a greeting")
//!     .with_action(|_, component, args| {
//!         let Some(flags) = component.parse_flags(args)? else {
//!             return Ok(());
//!         };
//!         println!("Hello {}!", flags.string("name").unwrap_or_default());
//!         Ok(())
//!     });
//! greet.flag_set_mut().string("name", "world", "who to greet");
//!
//! let root = Component::new("tool <component> [arguments]")
//!     .with_long("Tool does things.")
//!     .with_action(passthrough)
//!     .with_child(greet);
//!
//! let capture = Capture::new();
//! root.set_output(Some(capture.sink()));
//! root.run(&Context::new(), &[])?;
//!
//! assert_eq!(
//!     capture.contents(),
//!     "Usage: tool <component> [arguments]\n\
//!      \n\
//!      Tool does things.\n\
//!      \n\
//!      The components are:\n\
//!      greet       print a greeting\n"
//! );
//! # Ok::<(), cli_tree_core::Error>(())
//! ```

pub mod component;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod flags;
pub mod output;
pub mod usage;

pub use component::{Action, Component};
pub use context::Context;
pub use dispatch::passthrough;
pub use error::{Error, Result};
pub use flags::{FlagSet, ParsedFlags};
pub use output::{Capture, Sink};
