//! External command execution.

pub mod command;
pub mod mock;

pub use command::{
    command_line, Commander, SystemCommander, GH_TIMEOUT, GIT_TIMEOUT, TASK_TIMEOUT,
};
pub use mock::MockCommander;
