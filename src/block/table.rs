//! Tables (`|a|*b|`) and definition lists (`:term:desc`, `::desc`).

use lazy_static::lazy_static;
use regex::Regex;

use super::node::{Cell, Definition, NodeKind, Row};
use super::parser::BlockParser;

lazy_static! {
    static ref TERM: Regex = Regex::new(r"^:([^:]+):(.*)$").unwrap();
    static ref DESCRIPTION: Regex = Regex::new(r"^::(.*)$").unwrap();
}

impl BlockParser<'_> {
    /// Consume consecutive `|` lines as table rows.
    pub(super) fn try_table(&mut self) -> bool {
        if !self.cursor.peek().is_some_and(is_row) {
            return false;
        }

        let mut rows = Vec::new();
        while let Some(line) = self.cursor.peek().filter(|line| is_row(line)) {
            self.cursor.next_line();
            rows.push(row(line));
        }
        self.attach(NodeKind::Table { rows });
        true
    }

    /// Consume `:term:description` lines, each followed by any number of
    /// `::description` continuation lines.
    pub(super) fn try_definition_list(&mut self) -> bool {
        if !self.cursor.peek().is_some_and(|line| TERM.is_match(line)) {
            return false;
        }

        let mut items = Vec::new();
        while self.cursor.scan(&TERM) {
            let term = self.cursor.group(1).trim().to_owned();
            let first = self.cursor.group(2).trim();

            let mut descriptions = Vec::new();
            if !first.is_empty() {
                descriptions.push(first.to_owned());
            }
            while self.cursor.scan(&DESCRIPTION) {
                descriptions.push(self.cursor.group(1).to_owned());
            }
            items.push(Definition { term, descriptions });
        }
        self.attach(NodeKind::DefinitionList { items });
        true
    }
}

#[inline]
fn is_row(line: &str) -> bool {
    line.starts_with('|')
}

/// Split a row into cells; a leading `*` marks a header cell.
fn row(line: &str) -> Row {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(|cell| {
            let cell = cell.trim();
            match cell.strip_prefix('*') {
                Some(text) => Cell {
                    header: true,
                    text: text.trim().to_owned(),
                },
                None => Cell {
                    header: false,
                    text: cell.to_owned(),
                },
            }
        })
        .collect()
}
