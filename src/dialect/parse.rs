//! Statement scanner for NodeScript sources
//!
//! Splits a source text into statements without building an expression-level
//! AST: the transformer only needs statement boundaries, assignment targets,
//! and declared names. The scanner tracks string literals, comments, and
//! bracket depth so statement boundaries are not found inside any of them.

use super::{DialectError, Statement, StatementKind, SyntaxTree};

/// Parser options
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Allow statements to omit `;` and infer their end at line boundaries.
    /// With inference off, a missing `;` is a syntax error.
    pub infer_terminators: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            infer_terminators: true,
        }
    }
}

/// Keywords that open a block statement; such statements never receive an
/// inferred `;`.
const BLOCK_KEYWORDS: &[&str] = &[
    "function", "class", "if", "else", "for", "while", "do", "switch", "try", "catch", "finally",
];

/// Keywords that start a non-block statement and can never be an assignment
/// target.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "import", "export", "throw", "break", "continue", "new", "delete", "typeof", "void",
    "yield", "await", "in", "of", "instanceof",
];

/// Operators that, at the end of a line, continue the statement onto the next
const CONTINUATION_CHARS: &[char] = &[
    '+', '-', '*', '/', '%', '=', '<', '>', '&', '|', '^', '?', ':', ',', '.',
];

pub fn parse(source: &str, options: &ParseOptions) -> Result<SyntaxTree, DialectError> {
    let mut scanner = Scanner::default();
    let mut statements = Vec::new();
    let mut buf: Option<StatementBuf> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let lineno = idx + 1;
        let scan = scanner.scan_line(raw_line, lineno)?;

        match buf.take() {
            None if !scan.has_code => {
                // Blank and comment-only lines pass through verbatim; a
                // multi-line comment falls out as one trivia entry per line.
                statements.push(trivia(lineno, raw_line));
            }
            None => {
                let started = StatementBuf::start(lineno, raw_line, &scan);
                if scanner.statement_open() || started.continues() {
                    buf = Some(started);
                } else {
                    statements.push(started.finish(options)?);
                }
            }
            Some(mut open) => {
                let had_code = scan.has_code;
                open.append(raw_line, &scan);
                if scanner.statement_open() || (had_code && open.continues()) {
                    buf = Some(open);
                } else if had_code {
                    statements.push(open.finish(options)?);
                } else {
                    // A blank or comment-only line closes an inferred
                    // statement; emit it as its own trivia entry.
                    statements.push(open.finish_before(raw_line, options)?);
                    statements.push(trivia(lineno, raw_line));
                }
            }
        }
    }

    if scanner.in_block_comment {
        return Err(DialectError::new(
            scanner.block_comment_line,
            "unterminated block comment",
        ));
    }
    if let Some((open, line)) = scanner.opens.first() {
        return Err(DialectError::new(*line, format!("unclosed '{open}'")));
    }
    if let Some(open) = buf.take() {
        statements.push(open.finish(options)?);
    }

    Ok(SyntaxTree { statements })
}

fn trivia(line: usize, text: &str) -> Statement {
    Statement {
        line,
        text: text.to_string(),
        code_end: 0,
        kind: StatementKind::Trivia,
        declares: Vec::new(),
        terminated: true,
    }
}

/// A statement being accumulated across lines
struct StatementBuf {
    line: usize,
    text: String,
    code_end: usize,
    last_code_char: Option<char>,
    /// Text length before the most recent append, so a trailing trivia line
    /// can be split back off
    previous_len: usize,
}

impl StatementBuf {
    fn start(line: usize, text: &str, scan: &LineScan) -> Self {
        Self {
            line,
            text: text.to_string(),
            code_end: scan.code_end,
            last_code_char: scan.last_code_char,
            previous_len: 0,
        }
    }

    fn append(&mut self, text: &str, scan: &LineScan) {
        self.previous_len = self.text.len();
        self.text.push('\n');
        if scan.has_code {
            self.code_end = self.text.len() + scan.code_end;
            self.last_code_char = scan.last_code_char;
        }
        self.text.push_str(text);
    }

    fn continues(&self) -> bool {
        match self.last_code_char {
            Some(';') => false,
            Some(c) => CONTINUATION_CHARS.contains(&c),
            None => false,
        }
    }

    /// Finish the statement, dropping the line just appended (which belongs
    /// to no statement)
    fn finish_before(mut self, appended: &str, options: &ParseOptions) -> Result<Statement, DialectError> {
        debug_assert!(self.text.ends_with(appended));
        self.text.truncate(self.previous_len);
        self.finish(options)
    }

    fn finish(self, options: &ParseOptions) -> Result<Statement, DialectError> {
        let terminated = self.last_code_char == Some(';');
        let code = self.text[..self.code_end].trim_start();
        let (kind, declares) = classify(code);

        if !terminated && !options.infer_terminators {
            let needs_terminator =
                matches!(kind, StatementKind::Assignment { .. } | StatementKind::Simple);
            if needs_terminator {
                let end_line = self.line + self.text.matches('\n').count();
                return Err(DialectError::new(end_line, "missing ';'"));
            }
        }

        Ok(Statement {
            line: self.line,
            text: self.text,
            code_end: self.code_end,
            kind,
            declares,
            terminated,
        })
    }
}

/// Per-line scan result
struct LineScan {
    has_code: bool,
    /// Byte offset just past the last code character on the line
    code_end: usize,
    last_code_char: Option<char>,
}

/// Cross-line scanner state
#[derive(Default)]
struct Scanner {
    /// Currently open brackets, with the line each was opened on
    opens: Vec<(char, usize)>,
    in_block_comment: bool,
    block_comment_line: usize,
}

impl Scanner {
    fn statement_open(&self) -> bool {
        self.in_block_comment || !self.opens.is_empty()
    }

    fn scan_line(&mut self, line: &str, lineno: usize) -> Result<LineScan, DialectError> {
        let mut scan = LineScan {
            has_code: false,
            code_end: 0,
            last_code_char: None,
        };
        let mut chars = line.char_indices().peekable();
        let mut in_string: Option<char> = None;

        while let Some((i, c)) = chars.next() {
            if self.in_block_comment {
                if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    self.in_block_comment = false;
                }
                continue;
            }

            if let Some(quote) = in_string {
                mark(&mut scan, i, c);
                if c == '\\' {
                    if let Some((j, escaped)) = chars.next() {
                        mark(&mut scan, j, escaped);
                    }
                } else if c == quote {
                    in_string = None;
                }
                continue;
            }

            match c {
                '/' if matches!(chars.peek(), Some((_, '/'))) => break,
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    chars.next();
                    self.in_block_comment = true;
                    self.block_comment_line = lineno;
                }
                '\'' | '"' | '`' => {
                    in_string = Some(c);
                    mark(&mut scan, i, c);
                }
                '(' | '[' | '{' => {
                    self.opens.push((c, lineno));
                    mark(&mut scan, i, c);
                }
                ')' | ']' | '}' => {
                    match self.opens.pop() {
                        Some((open, _)) if closes(open, c) => {}
                        _ => {
                            return Err(DialectError::new(lineno, format!("unexpected '{c}'")));
                        }
                    }
                    mark(&mut scan, i, c);
                }
                c if c.is_whitespace() => {}
                _ => mark(&mut scan, i, c),
            }
        }

        if in_string.is_some() {
            return Err(DialectError::new(lineno, "unclosed string literal"));
        }

        Ok(scan)
    }
}

fn mark(scan: &mut LineScan, offset: usize, c: char) {
    scan.has_code = true;
    scan.code_end = offset + c.len_utf8();
    scan.last_code_char = Some(c);
}

fn closes(open: char, close: char) -> bool {
    matches!((open, close), ('(', ')') | ('[', ']') | ('{', '}'))
}

fn classify(code: &str) -> (StatementKind, Vec<String>) {
    let Some(word) = leading_ident(code) else {
        return (StatementKind::Simple, Vec::new());
    };
    let rest = code[word.len()..].trim_start();

    match word {
        "let" | "const" | "var" => (StatementKind::Simple, binding_names(rest)),
        "function" => (StatementKind::Block, function_names(rest)),
        "class" => (
            StatementKind::Block,
            leading_ident(rest).map(str::to_string).into_iter().collect(),
        ),
        w if BLOCK_KEYWORDS.contains(&w) => (StatementKind::Block, Vec::new()),
        w if STATEMENT_KEYWORDS.contains(&w) => (StatementKind::Simple, Vec::new()),
        w if is_plain_assignment(rest) => (
            StatementKind::Assignment {
                target: w.to_string(),
            },
            Vec::new(),
        ),
        _ => (StatementKind::Simple, Vec::new()),
    }
}

/// `rest` is the code following an identifier; a plain `=` (not `==`, `=>`)
/// makes the statement an assignment to that identifier.
fn is_plain_assignment(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('=') && !matches!(chars.next(), Some('=') | Some('>'))
}

fn leading_ident(code: &str) -> Option<&str> {
    let mut end = 0;
    for (i, c) in code.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_' || c == '$'
        } else {
            c.is_ascii_alphanumeric() || c == '_' || c == '$'
        };
        if !valid {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        None
    } else {
        Some(&code[..end])
    }
}

/// Names bound by a `let`/`const`/`var` list: the leading identifier of every
/// top-level comma segment
fn binding_names(rest: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut depth = 0usize;
    let mut segment_start = 0usize;

    for (i, c) in rest.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                if let Some(name) = leading_ident(rest[segment_start..i].trim_start()) {
                    names.push(name.to_string());
                }
                segment_start = i + 1;
            }
            _ => {}
        }
    }
    if let Some(name) = leading_ident(rest[segment_start..].trim_start()) {
        names.push(name.to_string());
    }
    names
}

/// The function's own name (if any) plus its parameter names
fn function_names(rest: &str) -> Vec<String> {
    let mut names: Vec<String> = leading_ident(rest).map(str::to_string).into_iter().collect();

    if let (Some(open), Some(close)) = (rest.find('('), rest.find(')')) {
        if open < close {
            for param in rest[open + 1..close].split(',') {
                if let Some(name) = leading_ident(param.trim_start()) {
                    names.push(name.to_string());
                }
            }
        }
    }
    names
}
