//! Fold markers (`====` and `=====`).

use lazy_static::lazy_static;
use regex::Regex;

use super::node::NodeKind;
use super::parser::BlockParser;

lazy_static! {
    static ref SEEMORE: Regex = Regex::new(r"^====(=)?$").unwrap();
}

impl BlockParser<'_> {
    /// Everything after the marker belongs to the fold. A `====` fold ends
    /// at the next level-1 heading; a `=====` fold runs to the end.
    pub(super) fn try_seemore(&mut self) -> bool {
        if !self.can_open() || !self.cursor.scan(&SEEMORE) {
            return false;
        }
        let is_super = !self.cursor.group(1).is_empty();
        self.open(NodeKind::SeeMore { is_super });
        true
    }
}
