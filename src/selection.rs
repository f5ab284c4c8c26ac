//! Cursor movement over a rendered suggestion list. The highlighted index
//! lives with the caller; `step` maps (current, key) to what happens next.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// New highlight; `None` means nothing is highlighted.
    Move(Option<usize>),
    /// Take the entry at this index and close the list.
    Accept(usize),
    /// Close the list without choosing.
    Dismiss,
    /// Nothing to navigate.
    Ignored,
}

pub fn step(selection: Option<usize>, len: usize, key: NavKey) -> Step {
    if len == 0 {
        return Step::Ignored;
    }
    let last = len - 1;
    let current = selection.map(|i| i.min(last));
    match key {
        NavKey::Down => Step::Move(Some(current.map_or(0, |i| (i + 1).min(last)))),
        NavKey::Up => Step::Move(current.and_then(|i| i.checked_sub(1))),
        NavKey::Confirm => Step::Accept(current.unwrap_or(0)),
        NavKey::Cancel => Step::Dismiss,
    }
}

/// The highlight after a step; accepting or dismissing clears it.
pub fn next_selection(selection: Option<usize>, step: Step) -> Option<usize> {
    match step {
        Step::Move(next) => next,
        Step::Accept(_) | Step::Dismiss => None,
        Step::Ignored => selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_from_nothing_highlights_first() {
        assert_eq!(step(None, 3, NavKey::Down), Step::Move(Some(0)));
        assert_eq!(step(Some(0), 3, NavKey::Down), Step::Move(Some(1)));
    }

    #[test]
    fn test_down_stops_at_last() {
        assert_eq!(step(Some(2), 3, NavKey::Down), Step::Move(Some(2)));
    }

    #[test]
    fn test_up_past_first_clears_highlight() {
        assert_eq!(step(Some(1), 3, NavKey::Up), Step::Move(Some(0)));
        assert_eq!(step(Some(0), 3, NavKey::Up), Step::Move(None));
        assert_eq!(step(None, 3, NavKey::Up), Step::Move(None));
    }

    #[test]
    fn test_confirm_takes_highlight_or_first() {
        assert_eq!(step(Some(2), 3, NavKey::Confirm), Step::Accept(2));
        assert_eq!(step(None, 3, NavKey::Confirm), Step::Accept(0));
    }

    #[test]
    fn test_cancel_dismisses() {
        assert_eq!(step(Some(1), 3, NavKey::Cancel), Step::Dismiss);
        assert_eq!(next_selection(Some(1), Step::Dismiss), None);
    }

    #[test]
    fn test_empty_list_ignores_everything() {
        for key in [NavKey::Down, NavKey::Up, NavKey::Confirm, NavKey::Cancel] {
            assert_eq!(step(Some(4), 0, key), Step::Ignored);
        }
        assert_eq!(next_selection(Some(4), Step::Ignored), Some(4));
    }

    #[test]
    fn test_stale_highlight_is_clamped() {
        // List shrank from 10 entries to 3 while index 7 was highlighted.
        assert_eq!(step(Some(7), 3, NavKey::Confirm), Step::Accept(2));
        assert_eq!(step(Some(7), 3, NavKey::Up), Step::Move(Some(1)));
    }

    #[test]
    fn test_accept_clears_selection() {
        let s = step(Some(1), 2, NavKey::Confirm);
        assert_eq!(next_selection(Some(1), s), None);
    }
}
