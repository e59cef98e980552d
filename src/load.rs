//! Graph loading: runs rule file parsing and constructs the build graph from it.

use crate::graph::{Graph, NodeId};
use crate::parse::{Parser, Statement};
use anyhow::{anyhow, Context};
use std::path::Path;

/// The result of loading a rule file.
pub struct State {
    pub graph: Graph,
    /// The first target declared, built when none is requested.
    pub default: Option<NodeId>,
}

/// Internal state used while loading.
#[derive(Default)]
struct Loader {
    graph: Graph,
    default: Option<NodeId>,
    /// Target that subsequent commands attach to.
    current: Option<NodeId>,
}

impl Loader {
    fn add_statement(&mut self, filename: &Path, stmt: Statement) -> anyhow::Result<()> {
        match stmt {
            Statement::Rule(rule) => {
                let id = self
                    .graph
                    .create_or_get(rule.target, true)
                    .with_context(|| format!("{}:{}", filename.display(), rule.line))?;
                for dep in rule.deps {
                    self.graph.add_dependency(id, dep);
                }
                self.default.get_or_insert(id);
                self.current = Some(id);
            }
            Statement::Command { text, line } => {
                // The parser rejects commands that precede every rule.
                let id = self.current.ok_or_else(|| {
                    anyhow!("{}:{}: command outside of a rule", filename.display(), line)
                })?;
                self.graph.add_command(id, text);
            }
        }
        Ok(())
    }

    fn parse(&mut self, filename: &Path, text: &str) -> anyhow::Result<()> {
        let mut parser = Parser::new(text);
        loop {
            let stmt = match parser
                .read()
                .map_err(|err| anyhow!(parser.format_parse_error(filename, err)))?
            {
                None => break,
                Some(s) => s,
            };
            self.add_statement(filename, stmt)?;
        }
        Ok(())
    }
}

/// Build a graph from rule file text.  `filename` is only used in messages.
pub fn parse(filename: &Path, text: &str) -> anyhow::Result<State> {
    let mut buf = String::with_capacity(text.len() + 1);
    buf.push_str(text);
    buf.push('\0');
    let mut loader = Loader::default();
    loader.parse(filename, &buf)?;
    Ok(State {
        graph: loader.graph,
        default: loader.default,
    })
}

/// Load a rule file from disk.
pub fn read(path: &Path) -> anyhow::Result<State> {
    let bytes = std::fs::read(path).map_err(|err| anyhow!("read {}: {}", path.display(), err))?;
    let text =
        String::from_utf8(bytes).map_err(|err| anyhow!("read {}: {}", path.display(), err))?;
    parse(path, &text)
}
