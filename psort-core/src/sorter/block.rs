use crate::config::SortConfig;

use super::groups::GroupTable;
use super::statement::StatementSyntax;

/// Reorders one block of statement lines.
///
/// Lines are ordered by group index, then by their trimmed text (plain byte
/// order, no decoding). The sort is stable, so identical lines keep their relative order.
#[derive(Debug, Clone, Default)]
pub struct BlockSorter {
    table: GroupTable,
    syntax: StatementSyntax,
    blank_between_groups: bool,
}

impl BlockSorter {
    pub fn new(table: GroupTable, syntax: StatementSyntax, blank_between_groups: bool) -> Self {
        Self {
            table,
            syntax,
            blank_between_groups,
        }
    }

    pub fn from_config(config: &SortConfig) -> Self {
        Self::new(
            GroupTable::new(&config.groups),
            StatementSyntax::from_config(config),
            config.newline_between_groups,
        )
    }

    pub fn syntax(&self) -> &StatementSyntax {
        &self.syntax
    }

    pub fn table(&self) -> &GroupTable {
        &self.table
    }

    /// Sort a block. Returned lines are raw bytes; inserted separators are empty.
    pub fn sort<S: AsRef<[u8]>>(&self, lines: &[S]) -> Vec<Vec<u8>> {
        let mut keyed: Vec<(usize, &[u8], &[u8])> = lines
            .iter()
            .map(|line| {
                let stmt = self.syntax.describe(line.as_ref());
                (self.table.group_index(stmt.import_path), stmt.trimmed, stmt.raw)
            })
            .collect();

        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        let separate = self.blank_between_groups && !self.table.is_empty();
        let mut out = Vec::with_capacity(keyed.len() + self.table.len());
        let mut last_group = None;

        for (group, _, raw) in keyed {
            if separate && last_group.is_some_and(|g| g != group) {
                out.push(Vec::new());
            }
            last_group = Some(group);
            out.push(raw.to_vec());
        }

        out
    }
}
