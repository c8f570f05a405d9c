use std::collections::HashMap;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use cli_tree_core::Context;
use log::{info, warn};

use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Executes a command with optional environment variables, killing it if the
/// context is cancelled while it runs.
///
/// # Errors
///
/// Returns an error if command execution fails, exits with non-zero status or
/// is cancelled.
pub fn execute_command<S: ::std::hash::BuildHasher>(
    context: &Context,
    mut command: Command,
    environment: Option<HashMap<String, String, S>>,
) -> Result<()> {
    let mut command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let Some(environment) = environment {
        info!("Executing with environment variables: {:?}", environment);
        command = command.envs(environment);
    };

    let mut child = command.spawn()?;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }

        if context.is_cancelled() {
            warn!("Cancelled, killing sub process {}", child.id());
            child.kill()?;
            child.wait()?;
            return Err(cli_tree_core::Error::Cancelled.into());
        }

        thread::sleep(POLL_INTERVAL);
    };

    if status.success() {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::hash::RandomState;

    use super::*;

    #[test]
    fn test_successful_command() {
        let result =
            execute_command::<RandomState>(&Context::new(), Command::new("true"), None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_failing_command() {
        let result =
            execute_command::<RandomState>(&Context::new(), Command::new("false"), None);
        assert!(matches!(result, Err(Error::SubProcessExit)));
    }

    #[test]
    fn test_environment_is_passed() {
        let mut command = Command::new("sh");
        command.args(["-c", "test \"$CLI_TREE_TEST\" = yes"]);
        let environment = HashMap::from([("CLI_TREE_TEST".to_string(), "yes".to_string())]);

        assert!(execute_command(&Context::new(), command, Some(environment)).is_ok());
    }

    #[test]
    fn test_cancelled_command_is_killed() {
        let context = Context::new();
        context.cancel();

        let mut command = Command::new("sleep");
        command.arg("5");
        let result = execute_command::<RandomState>(&context, command, None);

        assert!(matches!(
            result,
            Err(Error::Component(cli_tree_core::Error::Cancelled))
        ));
    }
}
