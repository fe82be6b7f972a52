//! Fixed-length OTP cell buffer.
//!
//! Models the digit-by-digit entry widget: one character per cell, a focus
//! index that auto-advances, backspace that walks left, and a paste path that
//! fills everything at once. Pure data structure — the login flow decides
//! when a complete buffer triggers verification.

/// Digit cells plus focus. Length is fixed at construction (`[otp] length`).
#[derive(Debug, Clone)]
pub struct OtpBuffer {
    cells: Vec<Option<char>>,
    focus: usize,
}

impl OtpBuffer {
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "OTP length must be at least 1");
        Self {
            cells: vec![None; length],
            focus: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Index of the currently focused cell.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Cell contents in order, for rendering.
    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    /// Handle a single-cell input event.
    ///
    /// Multi-character input violates the one-char-per-cell invariant and is
    /// rejected without touching state (the caller truncates its own display,
    /// as the entry widget does). Non-digits are rejected the same way. A
    /// digit lands in the focused cell and focus advances to the next empty
    /// cell. Returns `true` when the buffer just became complete.
    pub fn enter(&mut self, input: &str) -> bool {
        let mut chars = input.chars();
        let (first, rest) = (chars.next(), chars.next());
        let digit = match (first, rest) {
            (Some(c), None) if c.is_ascii_digit() => c,
            _ => return false,
        };

        self.cells[self.focus] = Some(digit);
        if let Some(next) = self.next_empty_from(self.focus + 1) {
            self.focus = next;
        }
        self.is_complete()
    }

    /// Backspace: clear the focused cell in place, or step left if it is
    /// already empty.
    pub fn backspace(&mut self) {
        if self.cells[self.focus].is_some() {
            self.cells[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
        }
    }

    /// Handle pasted text.
    ///
    /// Strips non-digits first. Fewer digits than the buffer length is a
    /// no-op — no cells fill and no submit fires. At least `len` digits fill
    /// every cell from the first `len` of them. Returns `true` when the
    /// buffer filled (and is therefore complete).
    pub fn paste(&mut self, text: &str) -> bool {
        let digits: Vec<char> = text.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < self.cells.len() {
            return false;
        }
        for (cell, digit) in self.cells.iter_mut().zip(digits) {
            *cell = Some(digit);
        }
        self.focus = self.cells.len() - 1;
        true
    }

    /// Empty all cells and refocus the first one.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.focus = 0;
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Concatenation of the filled cells in entry order.
    pub fn code(&self) -> String {
        self.cells.iter().filter_map(|c| *c).collect()
    }

    /// First empty cell at or after `start`, wrapping to the front so a
    /// hole left by an in-place backspace is found again.
    fn next_empty_from(&self, start: usize) -> Option<usize> {
        self.cells[start.min(self.cells.len())..]
            .iter()
            .position(|c| c.is_none())
            .map(|i| start + i)
            .or_else(|| self.cells.iter().position(|c| c.is_none()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_digits_advances_focus_and_completes() {
        let mut buf = OtpBuffer::new(4);
        assert!(!buf.enter("1"));
        assert_eq!(buf.focus(), 1);
        assert!(!buf.enter("2"));
        assert!(!buf.enter("3"));
        assert!(buf.enter("4"));
        assert!(buf.is_complete());
        assert_eq!(buf.code(), "1234");
    }

    #[test]
    fn multi_character_input_is_rejected_unchanged() {
        let mut buf = OtpBuffer::new(4);
        buf.enter("1");
        assert!(!buf.enter("23"));
        assert_eq!(buf.code(), "1");
        assert_eq!(buf.focus(), 1);
    }

    #[test]
    fn non_digit_input_is_rejected() {
        let mut buf = OtpBuffer::new(4);
        assert!(!buf.enter("a"));
        assert!(!buf.enter(" "));
        assert!(!buf.enter(""));
        assert!(buf.is_empty());
    }

    #[test]
    fn backspace_clears_in_place_then_walks_left() {
        let mut buf = OtpBuffer::new(4);
        buf.enter("1");
        buf.enter("2");
        // Focus sits on the empty cell 2: first backspace moves left...
        buf.backspace();
        assert_eq!(buf.focus(), 1);
        // ...second clears cell 1 in place.
        buf.backspace();
        assert_eq!(buf.code(), "1");
        assert_eq!(buf.focus(), 1);
    }

    #[test]
    fn backspace_on_first_empty_cell_stays_put() {
        let mut buf = OtpBuffer::new(4);
        buf.backspace();
        assert_eq!(buf.focus(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn refilling_a_backspaced_hole_returns_focus_forward() {
        let mut buf = OtpBuffer::new(4);
        for d in ["1", "2", "3"] {
            buf.enter(d);
        }
        buf.backspace(); // focused cell 3 is empty — walk left to 2
        buf.backspace(); // clear cell 2 in place, focus stays at 2
        assert_eq!(buf.code(), "12");
        buf.enter("9");
        assert_eq!(buf.code(), "129");
        assert_eq!(buf.focus(), 3);
        assert!(buf.enter("4"));
        assert_eq!(buf.code(), "1294");
    }

    #[test]
    fn short_paste_is_a_no_op() {
        let mut buf = OtpBuffer::new(6);
        assert!(!buf.paste("123"));
        assert!(!buf.paste("12-34 5"));
        assert!(buf.is_empty());
        assert_eq!(buf.focus(), 0);
    }

    #[test]
    fn full_paste_fills_all_cells() {
        let mut buf = OtpBuffer::new(6);
        assert!(buf.paste("987654"));
        assert_eq!(buf.code(), "987654");
        assert!(buf.is_complete());
    }

    #[test]
    fn paste_strips_formatting_and_truncates_extra_digits() {
        let mut buf = OtpBuffer::new(4);
        assert!(buf.paste("code: 1 2 3 4 5 6"));
        assert_eq!(buf.code(), "1234");
    }

    #[test]
    fn clear_resets_everything() {
        let mut buf = OtpBuffer::new(4);
        buf.paste("1234");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.focus(), 0);
        assert_eq!(buf.code(), "");
    }
}
