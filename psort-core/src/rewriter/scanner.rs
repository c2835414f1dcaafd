use crate::sorter::BlockSorter;

/// What a single input line is, as far as block detection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Statement,
    /// Empty or whitespace only.
    Blank,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Outside,
    InBlock,
}

/// Line-at-a-time block detector.
///
/// Lines outside a block pass straight through. Statement lines are held
/// until the block ends, then emitted sorted. Blank lines inside a block are
/// buffered: if another statement follows they are dropped, otherwise they
/// are emitted right after the sorted block.
#[derive(Debug)]
pub struct BlockScanner<'s> {
    sorter: &'s BlockSorter,
    state: ScanState,
    block: Vec<Vec<u8>>,
    pending_blanks: Vec<Vec<u8>>,
    blocks_sorted: usize,
}

impl<'s> BlockScanner<'s> {
    pub fn new(sorter: &'s BlockSorter) -> Self {
        Self {
            sorter,
            state: ScanState::Outside,
            block: Vec::new(),
            pending_blanks: Vec::new(),
            blocks_sorted: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Statement lines held for the current block.
    pub fn block_len(&self) -> usize {
        self.block.len()
    }

    /// Blank lines seen since the last statement of the current block.
    pub fn pending_blanks(&self) -> usize {
        self.pending_blanks.len()
    }

    pub fn blocks_sorted(&self) -> usize {
        self.blocks_sorted
    }

    pub fn classify(&self, line: &[u8]) -> LineKind {
        if self.sorter.syntax().is_statement(line) {
            LineKind::Statement
        } else if line.trim_ascii().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Other
        }
    }

    /// Feed one line (without its terminator). Lines ready for output are
    /// appended to `out`. Bytes are never decoded.
    pub fn feed(&mut self, line: Vec<u8>, out: &mut Vec<Vec<u8>>) {
        match (self.state, self.classify(&line)) {
            (ScanState::Outside, LineKind::Statement) => {
                self.state = ScanState::InBlock;
                self.block.push(line);
            }
            (ScanState::Outside, LineKind::Blank | LineKind::Other) => out.push(line),
            (ScanState::InBlock, LineKind::Statement) => {
                // Interior blanks are consolidated away.
                self.pending_blanks.clear();
                self.block.push(line);
            }
            (ScanState::InBlock, LineKind::Blank) => self.pending_blanks.push(line),
            (ScanState::InBlock, LineKind::Other) => {
                self.flush(out);
                out.push(line);
            }
        }
    }

    /// End of input. Flushes any open block.
    pub fn finish(&mut self, out: &mut Vec<Vec<u8>>) {
        if self.state == ScanState::InBlock {
            self.flush(out);
        }
    }

    fn flush(&mut self, out: &mut Vec<Vec<u8>>) {
        out.extend(self.sorter.sort(&self.block));
        out.append(&mut self.pending_blanks);
        self.block.clear();
        self.state = ScanState::Outside;
        self.blocks_sorted += 1;
    }
}
