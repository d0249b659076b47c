//! Directional focus movement over the focusable slots of one catalog level.
//!
//! All functions are pure index arithmetic: `count` is the number of
//! focusable slots, `per_page` the page size of the active grid mode. Filler
//! slots never enter this index space.

/// Vertical step down the "cylinder": one slot forward, wrapping across page
/// boundaries and from the last slot back to the first.
pub fn move_down(index: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (index + 1) % count
}

/// Vertical step up the cylinder: one slot back, wrapping from the first slot
/// to the last.
pub fn move_up(index: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (index + count - 1) % count
}

/// Lateral jump one page to the left. Asymmetric on purpose: a full wrap to
/// the last slot happens only from slot 0; any other undershoot clamps to
/// slot 0 so items on a short first page stay reachable.
pub fn move_left(index: usize, count: usize, per_page: usize) -> usize {
    if count == 0 || per_page == 0 {
        return 0;
    }
    match index.checked_sub(per_page) {
        Some(target) => target,
        None if index == 0 => count - 1,
        None => 0,
    }
}

/// Lateral jump one page to the right. Mirror of [`move_left`]: a full wrap
/// to slot 0 happens only from the very last slot, any other overshoot clamps
/// to the last slot.
pub fn move_right(index: usize, count: usize, per_page: usize) -> usize {
    if count == 0 || per_page == 0 {
        return 0;
    }
    let target = index + per_page;
    if target >= count {
        if index == count - 1 { 0 } else { count - 1 }
    } else {
        target
    }
}

/// Content page holding this slot.
pub fn page_of(index: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    index / per_page
}

/// Force an index back into `0..count`. Out-of-range focus is never an error,
/// it is clamped and life goes on.
pub fn clamp_index(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        index.min(count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_down_are_inverse_away_from_wrap() {
        for i in 1..8 {
            assert_eq!(move_up(move_down(i, 10), 10), i);
            assert_eq!(move_down(move_up(i, 10), 10), i);
        }
    }

    #[test]
    fn test_down_wraps_to_first() {
        assert_eq!(move_down(9, 10), 0);
        assert_eq!(move_down(0, 1), 0);
    }

    #[test]
    fn test_up_wraps_to_last() {
        assert_eq!(move_up(0, 10), 9);
        assert_eq!(move_up(0, 1), 0);
    }

    #[test]
    fn test_down_crosses_page_boundary() {
        // 3 per page: slot 2 is the last row of page 0, slot 3 opens page 1
        assert_eq!(move_down(2, 10), 3);
        assert_eq!(move_up(3, 10), 2);
    }

    #[test]
    fn test_left_right_jump_one_page() {
        assert_eq!(move_left(5, 10, 3), 2);
        assert_eq!(move_right(2, 10, 3), 5);
    }

    #[test]
    fn test_left_full_wrap_only_from_zero() {
        assert_eq!(move_left(0, 10, 3), 9);
        // 1 - 3 undershoots but index != 0: clamp, not wrap
        assert_eq!(move_left(1, 10, 3), 0);
        assert_eq!(move_left(2, 10, 3), 0);
    }

    #[test]
    fn test_right_full_wrap_only_from_last() {
        assert_eq!(move_right(9, 10, 3), 0);
        // 8 + 3 overshoots but index != 9: clamp to the last slot
        assert_eq!(move_right(8, 10, 3), 9);
        assert_eq!(move_right(7, 10, 3), 9);
    }

    #[test]
    fn test_lateral_single_step_in_list_mode() {
        // per_page 1 degenerates to the same single-step wrap as up/down
        assert_eq!(move_left(4, 10, 1), 3);
        assert_eq!(move_right(4, 10, 1), 5);
        assert_eq!(move_left(0, 10, 1), 9);
        assert_eq!(move_right(9, 10, 1), 0);
    }

    #[test]
    fn test_empty_collection_is_inert() {
        assert_eq!(move_up(0, 0), 0);
        assert_eq!(move_down(0, 0), 0);
        assert_eq!(move_left(0, 0, 3), 0);
        assert_eq!(move_right(0, 0, 3), 0);
    }

    #[test]
    fn test_page_of() {
        assert_eq!(page_of(0, 3), 0);
        assert_eq!(page_of(2, 3), 0);
        assert_eq!(page_of(3, 3), 1);
        assert_eq!(page_of(6, 3), 2);
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(12, 10), 9);
        assert_eq!(clamp_index(3, 10), 3);
        assert_eq!(clamp_index(5, 0), 0);
    }
}
