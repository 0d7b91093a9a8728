//! Indented line buffer for generated source

/// Accumulates generated lines at the current indentation.
///
/// Each open level remembers whether a statement line was written into it,
/// which lets indentation-sensitive targets fill an empty block.
#[derive(Debug)]
pub struct Writer {
    out: String,
    unit: String,
    /// One entry per open level: has a statement been written at it
    levels: Vec<bool>,
}

impl Writer {
    pub fn new(indent_width: usize) -> Self {
        Writer {
            out: String::new(),
            unit: " ".repeat(indent_width),
            levels: vec![false],
        }
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Write a statement line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.push(text.as_ref());
        if let Some(top) = self.levels.last_mut() {
            *top = true;
        }
    }

    /// Write a line that does not count as a statement.
    pub fn comment(&mut self, text: impl AsRef<str>) {
        self.push(text.as_ref());
    }

    pub fn blank_line(&mut self) {
        self.out.push('\n');
    }

    pub fn indent(&mut self) {
        self.levels.push(false);
    }

    pub fn dedent(&mut self) {
        if self.levels.len() > 1 {
            self.levels.pop();
        }
    }

    /// Whether a statement has been written since the last `indent`.
    pub fn block_has_content(&self) -> bool {
        self.levels.last().copied().unwrap_or(false)
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn push(&mut self, text: &str) {
        for _ in 0..self.depth() {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}
