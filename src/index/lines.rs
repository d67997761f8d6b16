//! Raw line text, addressable by line number.

/// The lowercased document, one entry per line.
#[derive(Debug, Clone, Default)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    pub fn new(lines: Vec<String>) -> Self {
        LineStore { lines }
    }

    /// Text of the 1-based `line`, if it exists.
    pub fn line(&self, line: u32) -> Option<&str> {
        let index = (line as usize).checked_sub(1)?;
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines paired with their 1-based numbers.
    pub fn numbered(&self) -> impl Iterator<Item = (u32, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, text)| (index as u32 + 1, text.as_str()))
    }
}
