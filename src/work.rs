//! Build runner, choosing and executing commands for stale nodes.

use crate::error::BuildError;
use crate::fs::{FileSystem, MTime};
use crate::graph::{Graph, NodeId};
use crate::process::{Runner, Termination};
use crate::progress::Progress;
use crate::trace;
use anyhow::Context;

/// Where a node is in the post-order walk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Visit {
    Unvisited,
    /// Entered but its dependencies are not all resolved yet.  Reaching a
    /// node in this state again means the graph has a cycle.
    Visiting,
    Completed,
}

/// Per-node state for a single traversal.
#[derive(Clone, Debug)]
struct NodeState {
    visit: Visit,
    must_build: bool,
    /// Valid once the node has been visited.
    mtime: MTime,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState {
            visit: Visit::Unvisited,
            must_build: false,
            mtime: MTime::Missing,
        }
    }
}

/// One traversal over a fully constructed graph.  All visit markers live
/// here rather than on the graph, so building another target from scratch
/// just means making a new Work.
pub struct Work<'a> {
    graph: &'a Graph,
    fs: &'a dyn FileSystem,
    runner: &'a mut dyn Runner,
    progress: &'a mut dyn Progress,
    states: Vec<NodeState>,
    /// Count of nodes rebuilt so far.
    rebuilt: usize,
}

impl<'a> Work<'a> {
    pub fn new(
        graph: &'a Graph,
        fs: &'a dyn FileSystem,
        runner: &'a mut dyn Runner,
        progress: &'a mut dyn Progress,
    ) -> Self {
        Work {
            graph,
            fs,
            runner,
            progress,
            states: vec![NodeState::default(); graph.len()],
            rebuilt: 0,
        }
    }

    /// Bring the named target up to date, returning the number of nodes
    /// rebuilt along the way.  Zero means the target was already up to date.
    pub fn build(&mut self, name: &str) -> anyhow::Result<usize> {
        let id = self.graph.find_target(name)?;
        let before = self.rebuilt;
        self.resolve(id)?;
        Ok(self.rebuilt - before)
    }

    /// Whether any node has been rebuilt by this Work.
    pub fn commands_ran(&self) -> bool {
        self.rebuilt > 0
    }

    pub fn visit(&self, id: NodeId) -> Visit {
        self.states[id.index()].visit
    }

    pub fn must_build(&self, id: NodeId) -> bool {
        self.states[id.index()].must_build
    }

    /// The node's mtime as last observed by this traversal.
    pub fn mtime(&self, id: NodeId) -> MTime {
        self.states[id.index()].mtime
    }

    fn refresh_status(&mut self, id: NodeId) -> anyhow::Result<()> {
        let name = &self.graph.node(id).name;
        let mtime = self
            .fs
            .stat(name)
            .with_context(|| format!("stat {:?}", name))?;
        self.states[id.index()].mtime = mtime;
        Ok(())
    }

    /// Post-order walk: bring every dependency up to date, then rebuild each
    /// node if it's missing or older than any dependency.  Uses an explicit
    /// stack so long dependency chains can't overflow the thread's stack.
    fn resolve(&mut self, root: NodeId) -> anyhow::Result<()> {
        if self.states[root.index()].visit != Visit::Unvisited {
            return Ok(());
        }
        let graph = self.graph;
        self.enter(root)?;
        // Nodes being visited, each with the index of its next dependency.
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        while let Some(top) = stack.last_mut() {
            let (id, next) = *top;
            let deps = graph.node(id).deps();
            if next > 0 {
                // deps[next - 1] has been resolved, or was visited already.
                self.check_dep(id, deps[next - 1])?;
            }
            if let Some(&dep) = deps.get(next) {
                top.1 += 1;
                if self.states[dep.index()].visit == Visit::Unvisited {
                    self.enter(dep)?;
                    stack.push((dep, 0));
                }
                continue;
            }
            stack.pop();
            self.finish(id)?;
        }
        Ok(())
    }

    /// Mark a node as visiting and stat it.  A missing node must be built,
    /// and is an error if no rule builds it.
    fn enter(&mut self, id: NodeId) -> anyhow::Result<()> {
        self.states[id.index()].visit = Visit::Visiting;
        self.refresh_status(id)?;
        if !self.states[id.index()].mtime.exists() {
            let node = self.graph.node(id);
            if !node.is_target {
                return Err(BuildError::DanglingDependency {
                    name: node.name.clone(),
                }
                .into());
            }
            self.states[id.index()].must_build = true;
        }
        Ok(())
    }

    /// Called once `dep` is resolved: fold its state into `id`'s.
    fn check_dep(&mut self, id: NodeId, dep: NodeId) -> anyhow::Result<()> {
        let dep_state = &self.states[dep.index()];
        if dep_state.visit != Visit::Completed {
            return Err(BuildError::CycleDetected {
                from: self.graph.node(id).name.clone(),
                to: self.graph.node(dep).name.clone(),
            }
            .into());
        }
        let state = &self.states[id.index()];
        if !state.must_build
            && (!dep_state.mtime.exists() || dep_state.mtime.newer_than(&state.mtime))
        {
            self.states[id.index()].must_build = true;
        }
        Ok(())
    }

    /// All dependencies are done; rebuild if needed.
    fn finish(&mut self, id: NodeId) -> anyhow::Result<()> {
        if self.states[id.index()].must_build {
            self.run_commands(id)?;
            self.refresh_status(id)?;
        }
        self.states[id.index()].visit = Visit::Completed;
        Ok(())
    }

    /// Run a node's commands in order.  The first failure aborts the build.
    fn run_commands(&mut self, id: NodeId) -> anyhow::Result<()> {
        self.rebuilt += 1;
        let node = self.graph.node(id);
        for cmdline in node.commands() {
            self.progress.task_started(id, node, cmdline);
            let runner = &mut self.runner;
            let termination = trace::scope("command", || runner.run(cmdline))?;
            self.progress.task_finished(id, node, cmdline, &termination);
            if termination != Termination::Success {
                return Err(BuildError::CommandFailed {
                    cmdline: cmdline.clone(),
                    reason: termination.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
