use crate::config::WILDCARD;

/// Ordered import prefixes; a line's group is the index of the entry it
/// resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTable {
    prefixes: Vec<String>,
    /// Position of the first `*` entry.
    wildcard: Option<usize>,
}

impl GroupTable {
    pub fn new(groups: &[String]) -> Self {
        Self {
            prefixes: groups.to_vec(),
            wildcard: groups.iter().position(|g| g == WILDCARD),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Resolve an import path to its group index.
    ///
    /// 1. The first non-wildcard entry that is a prefix of `import_path`.
    /// 2. Otherwise the wildcard entry, if the table has one.
    /// 3. Otherwise `len()`, which sorts after every configured group.
    ///
    /// An empty table puts everything in group 0.
    pub fn group_index(&self, import_path: impl AsRef<[u8]>) -> usize {
        let import_path = import_path.as_ref();
        if self.prefixes.is_empty() {
            return 0;
        }

        let specific = self
            .prefixes
            .iter()
            .enumerate()
            .filter(|(_, prefix)| prefix.as_str() != WILDCARD)
            .find(|(_, prefix)| import_path.starts_with(prefix.as_bytes()))
            .map(|(i, _)| i);

        specific
            .or(self.wildcard)
            .unwrap_or(self.prefixes.len())
    }
}
