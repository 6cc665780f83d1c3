use std::collections::HashMap;

/// Tracks how deep the scanner is inside nested `<sections>` groups and the
/// last section name seen at each depth.
///
/// Only one name is kept per depth: a later sibling replaces an earlier one,
/// and names below the current depth are left in place when a group closes.
#[derive(Debug, Default)]
pub struct CategoryTracker {
    depth: usize,
    names: HashMap<usize, String>,
}

impl CategoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn enter_section_group(&mut self) {
        self.depth += 1;
    }

    /// Returns `false` when there is no open group to leave.
    pub fn leave_section_group(&mut self) -> bool {
        match self.depth.checked_sub(1) {
            Some(depth) => {
                self.depth = depth;
                true
            }
            None => false,
        }
    }

    pub fn record_section_name(&mut self, depth: usize, name: String) {
        self.names.insert(depth, name);
    }

    pub fn category_at(&self, depth: usize) -> Option<&str> {
        self.names.get(&depth).map(String::as_str)
    }
}
