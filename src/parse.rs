//! Parser for rule files.
//!
//! The format is line oriented:
//!
//! ```text
//! app: main.o util.o
//! 	link main.o util.o -o app
//! ```
//!
//! A line starting with a tab is a command for the most recent target, a
//! blank line is ignored, and anything else is `target: deps...`.
//!
//! Parsing hands out references into the input text, marked with the
//! lifetime `'text`.

use crate::scanner::{is_space, ParseResult, Scanner};

#[derive(Debug, PartialEq)]
pub struct Rule<'text> {
    pub target: &'text str,
    pub deps: Vec<&'text str>,
    pub line: usize,
}

#[derive(Debug, PartialEq)]
pub enum Statement<'text> {
    Rule(Rule<'text>),
    /// A command line belonging to the most recent Rule.
    Command { text: &'text str, line: usize },
}

pub struct Parser<'text> {
    scanner: Scanner<'text>,
    /// Commands are only legal once some rule has been seen.
    seen_rule: bool,
}

impl<'text> Parser<'text> {
    /// `buf` must end with a nul.
    pub fn new(buf: &'text str) -> Parser<'text> {
        Parser {
            scanner: Scanner::new(buf),
            seen_rule: false,
        }
    }

    pub fn format_parse_error(
        &self,
        filename: &std::path::Path,
        err: crate::scanner::ParseError,
    ) -> String {
        self.scanner.format_parse_error(filename, err)
    }

    pub fn read(&mut self) -> ParseResult<Option<Statement<'text>>> {
        loop {
            match self.scanner.peek() {
                '\0' if self.scanner.at_end() => return Ok(None),
                '\0' => return self.scanner.parse_error("unexpected nul byte"),
                '\n' => self.scanner.next(),
                '\t' => {
                    if let Some(stmt) = self.read_command()? {
                        return Ok(Some(stmt));
                    }
                }
                _ => {
                    self.scanner.skip_spaces();
                    match self.scanner.peek() {
                        // Blank line.
                        '\n' | '\0' => {}
                        _ => return Ok(Some(Statement::Rule(self.read_rule()?))),
                    }
                }
            }
        }
    }

    /// Read a tab-led command line.  Lines with nothing but whitespace after
    /// the tab are dropped.
    fn read_command(&mut self) -> ParseResult<Option<Statement<'text>>> {
        let line = self.scanner.line;
        let start = self.scanner.ofs;
        self.scanner.next();
        let text = self.scanner.read_to_eol();
        let text = text.strip_suffix('\r').unwrap_or(text);
        if text.chars().all(is_space) {
            return Ok(None);
        }
        if !self.seen_rule {
            return self
                .scanner
                .parse_error_at(start, "command found before any target");
        }
        Ok(Some(Statement::Command { text, line }))
    }

    /// Read a token, ending at whitespace, newline, end of input, or a colon
    /// if `stop_at_colon`.
    fn read_word(&mut self, stop_at_colon: bool) -> &'text str {
        let start = self.scanner.ofs;
        loop {
            let c = self.scanner.peek();
            if is_space(c) || c == '\n' || c == '\0' || (stop_at_colon && c == ':') {
                break;
            }
            self.scanner.next();
        }
        self.scanner.slice(start, self.scanner.ofs)
    }

    fn read_rule(&mut self) -> ParseResult<Rule<'text>> {
        let line = self.scanner.line;
        let target = self.read_word(true);
        if target.is_empty() {
            return self.scanner.parse_error("expected target name");
        }
        self.scanner.skip_spaces();
        if !self.scanner.skip(':') {
            return self
                .scanner
                .parse_error("expected ':' between target and dependencies");
        }

        let mut deps = Vec::new();
        loop {
            self.scanner.skip_spaces();
            match self.scanner.peek() {
                '\n' | '\0' => break,
                _ => {
                    let start = self.scanner.ofs;
                    let dep = self.read_word(false);
                    if let Some(colon) = dep.find(':') {
                        return self
                            .scanner
                            .parse_error_at(start + colon, "too many ':' in dependency line");
                    }
                    deps.push(dep);
                }
            }
        }

        self.seen_rule = true;
        Ok(Rule { target, deps, line })
    }
}
