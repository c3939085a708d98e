//! Line-indexed cursor over the extracted text blob.
//!
//! The source layout is positional: fields live at fixed line offsets from
//! marker lines. Keeping all line arithmetic in one type means the parsers
//! read as "marker + offset" instead of raw index juggling, and the fragile
//! part can be tested on its own.

/// A read-only view of the text blob, split into lines once.
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
}

impl<'a> LineCursor<'a> {
    /// Split `text` into lines.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, untrimmed.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    /// Line at `index`, trimmed.
    pub fn get_trimmed(&self, index: usize) -> Option<&'a str> {
        self.get(index).map(str::trim)
    }

    /// Index of the first line containing `marker`.
    pub fn find(&self, marker: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(marker))
    }

    /// Index of the first line at or after `start` for which `pred` holds.
    pub fn find_from(&self, start: usize, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, line)| pred(line))
            .map(|(i, _)| i)
    }

    /// Indices `[center - before, center + after]`, clamped to the text.
    pub fn window(&self, center: usize, before: usize, after: usize) -> std::ops::Range<usize> {
        let start = center.saturating_sub(before);
        let end = (center + after + 1).min(self.lines.len());
        start..end
    }

    /// Iterate over the first `n` lines.
    pub fn head(&self, n: usize) -> impl Iterator<Item = &'a str> + '_ {
        self.lines.iter().take(n).copied()
    }
}
