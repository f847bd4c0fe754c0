/// Reference window searched by the aligner for one seed offset
///
/// The window spans one read length before the seed and two after it, which
/// leaves room for indels on either side. It is clamped to the reference so
/// `start + length <= reference_len` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentWindow {
    pub start: usize,
    pub length: usize,
}

impl AlignmentWindow {
    pub fn around_seed(seed_offset: usize, read_len: usize, reference_len: usize) -> Self {
        debug_assert!(read_len > 0, "reads must be non-empty");

        let start = if seed_offset < read_len {
            0
        } else {
            seed_offset - read_len
        };
        // Seeds past the end of the reference give an empty window at the end
        let start = start.min(reference_len);

        let mut length = 3 * read_len;
        if start + length > reference_len {
            length = reference_len - start;
        }

        AlignmentWindow { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Slice of the reference covered by this window
    pub fn slice<'r>(&self, reference: &'r [u8]) -> &'r [u8] {
        &reference[self.start..self.end()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_near_start_clamps_to_zero() {
        let window = AlignmentWindow::around_seed(0, 4, 10);
        assert_eq!(window, AlignmentWindow { start: 0, length: 10 });
    }

    #[test]
    fn test_interior_seed() {
        let window = AlignmentWindow::around_seed(100, 20, 1000);
        assert_eq!(window.start, 80);
        assert_eq!(window.length, 60);
        assert_eq!(window.end(), 140);
    }

    #[test]
    fn test_seed_past_reference_end() {
        let window = AlignmentWindow::around_seed(50, 4, 20);
        assert_eq!(window.start, 20);
        assert!(window.is_empty());
        assert_eq!(window.slice(&[b'A'; 20]), b"");
    }

    #[test]
    fn test_window_shrinks_at_reference_end() {
        let window = AlignmentWindow::around_seed(15, 4, 20);
        assert_eq!(window.start, 11);
        assert_eq!(window.end(), 20);
    }
}
