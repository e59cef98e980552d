//! Scans an input string (rule file) character by character.

use std::path::Path;

#[derive(Debug)]
pub struct ParseError {
    msg: String,
    ofs: usize,
}
pub type ParseResult<T> = Result<T, ParseError>;

pub struct Scanner<'a> {
    buf: &'a str,
    pub ofs: usize,
    pub line: usize,
}

/// Whitespace within a line; newlines are significant and not included.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0b' | '\x0c')
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a str) -> Self {
        if !buf.ends_with('\0') {
            panic!("Scanner requires nul-terminated buf");
        }
        Scanner {
            buf,
            ofs: 0,
            line: 1,
        }
    }

    /// Text between two offsets.  Offsets handed out by the scanner always
    /// sit next to ASCII delimiters, so they are char boundaries.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.buf[start..end]
    }
    pub fn peek(&self) -> char {
        self.buf.as_bytes()[self.ofs] as char
    }
    /// Whether the scanner sits on the terminating nul.
    pub fn at_end(&self) -> bool {
        self.ofs == self.buf.len() - 1
    }
    pub fn next(&mut self) {
        if self.peek() == '\n' {
            self.line += 1;
        }
        if self.at_end() {
            panic!("scanned past end")
        }
        self.ofs += 1;
    }
    pub fn read(&mut self) -> char {
        let c = self.peek();
        self.next();
        c
    }
    pub fn skip(&mut self, ch: char) -> bool {
        if self.peek() == ch {
            self.next();
            return true;
        }
        false
    }

    pub fn skip_spaces(&mut self) {
        while is_space(self.peek()) {
            self.next();
        }
    }

    /// Advance to the next newline or the end of input, returning the text
    /// passed over.  The newline itself is not consumed.
    pub fn read_to_eol(&mut self) -> &'a str {
        let start = self.ofs;
        while !matches!(self.peek(), '\n' | '\0') {
            self.next();
        }
        self.slice(start, self.ofs)
    }

    pub fn parse_error<T, S: Into<String>>(&self, msg: S) -> ParseResult<T> {
        self.parse_error_at(self.ofs, msg)
    }

    pub fn parse_error_at<T, S: Into<String>>(&self, ofs: usize, msg: S) -> ParseResult<T> {
        Err(ParseError {
            msg: msg.into(),
            ofs,
        })
    }

    pub fn format_parse_error(&self, filename: &Path, err: ParseError) -> String {
        let mut ofs = 0;
        let text = &self.buf[..self.buf.len() - 1];
        for (line_number, line) in text.split('\n').enumerate() {
            if ofs + line.len() >= err.ofs {
                let mut msg = "parse error: ".to_string();
                msg.push_str(&err.msg);
                msg.push('\n');

                let prefix = format!("{}:{}: ", filename.display(), line_number + 1);
                msg.push_str(&prefix);

                let line = line.trim_end_matches('\r');
                let col = line[..(err.ofs - ofs).min(line.len())].chars().count();
                msg.push_str(line);
                msg.push('\n');

                msg.push_str(&" ".repeat(prefix.len() + col));
                msg.push('^');
                return msg;
            }
            ofs += line.len() + 1;
        }
        panic!("invalid offset when formatting error")
    }
}
