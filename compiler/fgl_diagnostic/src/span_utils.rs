//! Line and column lookup for spans.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// ```
/// use fgl_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "MAIN\n  LET x = 1\nEND MAIN";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.line_col(0), (1, 1));
/// assert_eq!(table.line_col(7), (2, 3));
/// assert_eq!(table.line_col(17), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "line count is bounded by source length, which fits in u32"
    )]
    pub fn line(&self, offset: u32) -> u32 {
        let index = self.offsets.partition_point(|&start| start <= offset);
        index.max(1) as u32
    }

    /// 1-based (line, column); columns count bytes.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let start = self.offsets[(line - 1) as usize];
        (line, offset - start + 1)
    }

    /// Byte offset where 1-based `line` starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.offsets.get(line.checked_sub(1)? as usize).copied()
    }
}

/// One-shot (line, column) lookup; builds no table.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let end = (offset as usize).min(source.len());
    let before = &source.as_bytes()[..end];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |p| p + 1);
    (
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(end - line_start + 1).unwrap_or(u32::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_one_shot() {
        let source = "a\nbb\n\nccc";
        let table = LineOffsetTable::build(source);
        for offset in 0..=u32::try_from(source.len()).unwrap_or(0) {
            assert_eq!(
                table.line_col(offset),
                offset_to_line_col(source, offset),
                "offset {offset}"
            );
        }
    }

    #[test]
    fn test_line_start() {
        let table = LineOffsetTable::build("ab\ncd");
        assert_eq!(table.line_start(1), Some(0));
        assert_eq!(table.line_start(2), Some(3));
        assert_eq!(table.line_start(3), None);
        assert_eq!(table.line_start(0), None);
    }
}
