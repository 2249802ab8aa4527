use std::fmt::Display;

use itertools::Itertools;

// Square n*n chart. Cell (i, j) holds the nonterminals deriving tokens i..=j;
// only i <= j is ever filled. Each cell is a fixed-width membership row over
// the grammar's nonterminals, all rows packed into one vector
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTable {
    len: usize,
    names: Vec<String>,
    marks: Vec<bool>,
}

impl ParseTable {
    // None when the n*n*|N| cells cannot be counted or allocated
    pub(crate) fn new(len: usize, names: Vec<String>) -> Option<Self> {
        let cells = len.checked_mul(len)?.checked_mul(names.len())?;

        let mut marks = Vec::new();
        marks.try_reserve_exact(cells).ok()?;
        marks.resize(cells, false);

        Some(ParseTable { len, names, marks })
    }

    fn offset(&self, start: usize, end: usize) -> usize {
        (start * self.len + end) * self.names.len()
    }

    pub(crate) fn contains(&self, start: usize, end: usize, nonterminal: usize) -> bool {
        self.marks[self.offset(start, end) + nonterminal]
    }

    // Cells only ever gain entries
    pub(crate) fn insert(&mut self, start: usize, end: usize, nonterminal: usize) {
        let offset = self.offset(start, end);
        self.marks[offset + nonterminal] = true;
    }

    // Number of input tokens the table was built for
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // Nonterminals deriving the span start..=end, in sorted order. Spans
    // outside the table are empty
    pub fn cell(&self, start: usize, end: usize) -> Vec<&str> {
        if start > end || end >= self.len {
            return Vec::new();
        }

        let offset = self.offset(start, end);
        self.names.iter()
            .enumerate()
            .filter(|(index, _)| self.marks[offset + index])
            .map(|(_, name)| name.as_str())
            .collect()
    }

    pub fn derives(&self, nonterminal: &str, start: usize, end: usize) -> bool {
        if start > end || end >= self.len {
            return false;
        }

        match self.names.iter().position(|name| name == nonterminal) {
            Some(index) => self.contains(start, end, index),
            None => false,
        }
    }
}

// Prints the chart as a pyramid, whole input on top and single tokens at
// the bottom
impl Display for ParseTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = (1..=self.len).rev()
            .map(|span| (0..=self.len - span)
                .map(|start| {
                    let cell = self.cell(start, start + span - 1);
                    if cell.is_empty() {
                        "-".to_string()
                    } else {
                        format!("{{{}}}", cell.join(","))
                    }
                })
                .collect_vec())
            .collect_vec();

        let width = rendered.iter().flatten().map(String::len).max().unwrap_or(0);
        for row in rendered {
            writeln!(f, "{}", row.iter().map(|cell| format!("{:<width$}", cell)).join(" ").trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cells_accumulate() {
        let mut table = ParseTable::new(3, names(&["A", "B", "S"])).unwrap();
        assert!(table.cell(0, 2).is_empty());

        table.insert(0, 2, 2);
        table.insert(0, 2, 0);
        table.insert(0, 2, 2);

        assert_eq!(table.cell(0, 2), vec!["A", "S"]);
        assert!(table.derives("S", 0, 2));
        assert!(!table.derives("B", 0, 2));
        assert!(!table.derives("Z", 0, 2));
        assert!(table.cell(1, 2).is_empty());
    }

    #[test]
    fn out_of_range_spans_are_empty() {
        let mut table = ParseTable::new(2, names(&["A"])).unwrap();
        table.insert(0, 1, 0);

        assert!(table.cell(1, 0).is_empty());
        assert!(table.cell(0, 2).is_empty());
        assert!(!table.derives("A", 0, 5));
        assert!(!table.derives("A", 1, 0));
    }

    #[test]
    fn empty_table() {
        let table = ParseTable::new(0, names(&["S"])).unwrap();

        assert!(table.is_empty());
        assert!(table.cell(0, 0).is_empty());
        assert_eq!(table.to_string(), "");
    }

    #[test]
    fn oversized_table_is_refused() {
        assert!(ParseTable::new(usize::MAX / 2, names(&["S"])).is_none());
        assert!(ParseTable::new(usize::MAX, Vec::new()).is_none());
        assert!(ParseTable::new(4, names(&["S"])).is_some());
    }

    #[test]
    fn renders_pyramid() {
        let mut table = ParseTable::new(2, names(&["A", "S"])).unwrap();
        table.insert(0, 0, 0);
        table.insert(1, 1, 0);
        table.insert(0, 1, 1);

        assert_eq!(table.to_string(), "{S}\n{A} {A}\n");
    }
}
