use crate::config::SortConfig;

/// Single-line textual test for block statements, e.g. `use Foo\Bar;`.
///
/// Works on raw bytes, so lines need not be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSyntax {
    /// Keyword plus its separating space.
    prefix: String,
    terminator: String,
}

impl Default for StatementSyntax {
    fn default() -> Self {
        Self::from_config(&SortConfig::default())
    }
}

impl StatementSyntax {
    pub fn new(keyword: &str, terminator: &str) -> Self {
        Self {
            prefix: format!("{} ", keyword),
            terminator: terminator.to_string(),
        }
    }

    pub fn from_config(config: &SortConfig) -> Self {
        Self {
            prefix: config.statement_prefix(),
            terminator: config.terminator.clone(),
        }
    }

    pub fn is_statement(&self, line: impl AsRef<[u8]>) -> bool {
        let trimmed = line.as_ref().trim_ascii();
        trimmed.starts_with(self.prefix.as_bytes()) && trimmed.ends_with(self.terminator.as_bytes())
    }

    /// Classify a raw line; `None` for anything but a statement.
    pub fn parse<'a>(&self, raw: &'a [u8]) -> Option<StatementLine<'a>> {
        if !self.is_statement(raw) {
            return None;
        }
        Some(self.describe(raw))
    }

    /// Build the views of a line without checking that it is a statement.
    pub(crate) fn describe<'a>(&self, raw: &'a [u8]) -> StatementLine<'a> {
        let trimmed = raw.trim_ascii();
        StatementLine {
            raw,
            trimmed,
            import_path: self.import_path(trimmed),
        }
    }

    /// Strip the keyword prefix and the terminator, each only if present.
    pub fn import_path<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        let trimmed = line.trim_ascii();
        let rest = trimmed
            .strip_prefix(self.prefix.as_bytes())
            .unwrap_or(trimmed);
        rest.strip_suffix(self.terminator.as_bytes()).unwrap_or(rest)
    }
}

/// One line of a block, viewed three ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementLine<'a> {
    /// Exactly as read, indentation included.
    pub raw: &'a [u8],
    pub trimmed: &'a [u8],
    /// e.g. `App\Models\User` for `use App\Models\User;`
    pub import_path: &'a [u8],
}
