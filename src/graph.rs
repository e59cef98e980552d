//! The build graph, a graph between named nodes, their dependencies and
//! the commands that produce them.

use crate::error::BuildError;
use rustc_hash::FxHashMap;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(usize);
impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named artifact.  Usually a file on disk, but a target need not ever
/// produce a file of its name (e.g. "clean").
#[derive(Debug)]
pub struct Node {
    pub name: String,
    /// Whether a rule declared this node buildable.
    pub is_target: bool,
    deps: Vec<NodeId>,
    commands: Vec<String>,
}

impl Node {
    fn new(name: String, is_target: bool) -> Self {
        Node {
            name,
            is_target,
            deps: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Dependencies in declaration order.  May contain repeats.
    pub fn deps(&self) -> &[NodeId] {
        &self.deps
    }

    /// Shell command lines in declaration order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

/// Owns every node, keyed by unique name.
#[derive(Default)]
pub struct Graph {
    nodes: Vec<Node>,
    name_to_id: FxHashMap<String, NodeId>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    fn add_node(&mut self, name: &str, is_target: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name.to_owned(), is_target));
        self.name_to_id.insert(name.to_owned(), id);
        id
    }

    /// Look up a node by name, creating it as a plain dependency if absent.
    fn node_id(&mut self, name: &str) -> NodeId {
        match self.name_to_id.get(name) {
            Some(&id) => id,
            None => self.add_node(name, false),
        }
    }

    /// Fetch the node named `name`, creating it if needed.  Requesting a
    /// target promotes an existing plain node, but a name may only be
    /// declared a target once.
    pub fn create_or_get(&mut self, name: &str, is_target: bool) -> Result<NodeId, BuildError> {
        if let Some(&id) = self.name_to_id.get(name) {
            if is_target {
                let node = &mut self.nodes[id.index()];
                if node.is_target {
                    return Err(BuildError::DuplicateTarget(name.to_owned()));
                }
                node.is_target = true;
            }
            return Ok(id);
        }
        Ok(self.add_node(name, is_target))
    }

    /// Append an edge from `from` to the node named `to`, creating the
    /// latter as a plain dependency if it's not yet known.
    pub fn add_dependency(&mut self, from: NodeId, to: &str) -> NodeId {
        let to = self.node_id(to);
        self.nodes[from.index()].deps.push(to);
        to
    }

    /// Append a command line to a node, dropping one trailing line terminator.
    pub fn add_command(&mut self, id: NodeId, text: &str) {
        let text = match text.strip_suffix('\n') {
            Some(line) => line.strip_suffix('\r').unwrap_or(line),
            None => text,
        };
        self.nodes[id.index()].commands.push(text.to_owned());
    }

    pub fn find_target(&self, name: &str) -> Result<NodeId, BuildError> {
        match self.lookup(name) {
            Some(id) if self.node(id).is_target => Ok(id),
            _ => Err(BuildError::TargetNotFound(name.to_owned())),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
