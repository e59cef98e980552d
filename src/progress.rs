//! Build progress reporting, for the purpose of display to the user.

use crate::graph::{Node, NodeId};
use crate::process::Termination;
use std::io::Write;

/// Trait for build progress notifications.
pub trait Progress {
    /// Called just before a node's command line is handed to the shell.
    fn task_started(&mut self, id: NodeId, node: &Node, cmdline: &str);

    /// Called when a command completes, successfully or not.
    fn task_finished(&mut self, id: NodeId, node: &Node, cmdline: &str, result: &Termination);

    /// Log a line of output.
    fn log(&mut self, msg: &str);
}

/// Progress implementation for the console.  Executed command lines are
/// echoed to stdout after they succeed, one per line.
#[derive(Default)]
pub struct ConsoleProgress {}

impl ConsoleProgress {
    pub fn new() -> Self {
        ConsoleProgress {}
    }
}

impl Progress for ConsoleProgress {
    fn task_started(&mut self, _id: NodeId, _node: &Node, _cmdline: &str) {
        // The child shares our stdout; flush so our earlier lines come first.
        let _ = std::io::stdout().flush();
    }

    fn task_finished(&mut self, _id: NodeId, _node: &Node, cmdline: &str, result: &Termination) {
        if *result == Termination::Success {
            self.log(cmdline);
        }
    }

    fn log(&mut self, msg: &str) {
        println!("{}", msg);
    }
}

/// Implementation of Progress that prints nothing.
#[derive(Default)]
pub struct NoProgress {}

impl Progress for NoProgress {
    fn task_started(&mut self, _id: NodeId, _node: &Node, _cmdline: &str) {}
    fn task_finished(&mut self, _id: NodeId, _node: &Node, _cmdline: &str, _result: &Termination) {}
    fn log(&mut self, _msg: &str) {}
}
