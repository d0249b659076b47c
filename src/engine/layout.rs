/// How the current viewport width renders a catalog level: a single-column
/// list on narrow terminals, otherwise a paged card grid with a fixed number
/// of cards per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridMode {
    List,
    Paged2,
    Paged3,
}

/// Width cutoffs between the three regimes, in terminal columns. Kept in one
/// place so the config file can override them together.
#[derive(Clone, Copy, Debug)]
pub struct Breakpoints {
    pub wide: u16,
    pub medium: u16,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            wide: 100,
            medium: 60,
        }
    }
}

impl GridMode {
    pub fn from_width(width: u16, breakpoints: Breakpoints) -> Self {
        if width >= breakpoints.wide {
            GridMode::Paged3
        } else if width >= breakpoints.medium {
            GridMode::Paged2
        } else {
            GridMode::List
        }
    }

    /// Slots per page. List mode is a degenerate one-item page, which makes
    /// the lateral page-jump algorithms collapse to single steps.
    pub fn items_per_page(self) -> usize {
        match self {
            GridMode::List => 1,
            GridMode::Paged2 => 2,
            GridMode::Paged3 => 3,
        }
    }

    pub fn is_paged(self) -> bool {
        !matches!(self, GridMode::List)
    }
}

/// Number of synthetic leading rows injected ahead of the real items: list
/// mode always shows a breadcrumb row, plus a back row below the root level.
/// Paged modes inject nothing. Computed from the rows actually injected so
/// adding another synthetic row only changes this function.
pub fn lead_count(mode: GridMode, is_sub_level: bool) -> usize {
    match mode {
        GridMode::List => 1 + usize::from(is_sub_level),
        GridMode::Paged2 | GridMode::Paged3 => 0,
    }
}

/// Re-base a focus index across a layout switch so the user stays on the same
/// conceptual item even though the synthetic lead rows shift the index space.
/// `new_slot_count` counts focusable slots in the new mode.
pub fn rebase_index(
    old_index: usize,
    old_mode: GridMode,
    new_mode: GridMode,
    is_sub_level: bool,
    new_slot_count: usize,
) -> usize {
    if new_slot_count == 0 {
        return 0;
    }
    let shift = lead_count(new_mode, is_sub_level) as isize - lead_count(old_mode, is_sub_level) as isize;
    let shifted = old_index as isize + shift;
    shifted.clamp(0, new_slot_count as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_width_cutoffs() {
        let bp = Breakpoints::default();
        assert_eq!(GridMode::from_width(120, bp), GridMode::Paged3);
        assert_eq!(GridMode::from_width(100, bp), GridMode::Paged3);
        assert_eq!(GridMode::from_width(99, bp), GridMode::Paged2);
        assert_eq!(GridMode::from_width(60, bp), GridMode::Paged2);
        assert_eq!(GridMode::from_width(59, bp), GridMode::List);
    }

    #[test]
    fn test_lead_count_per_mode() {
        assert_eq!(lead_count(GridMode::List, false), 1);
        assert_eq!(lead_count(GridMode::List, true), 2);
        assert_eq!(lead_count(GridMode::Paged2, true), 0);
        assert_eq!(lead_count(GridMode::Paged3, false), 0);
    }

    #[test]
    fn test_rebase_paged_to_list_and_back() {
        // index 7 at a sub-level, 10 real items: paged -> list gains two
        // synthetic rows, list -> paged loses them again
        let to_list = rebase_index(7, GridMode::Paged3, GridMode::List, true, 12);
        assert_eq!(to_list, 9);
        let back = rebase_index(to_list, GridMode::List, GridMode::Paged3, true, 10);
        assert_eq!(back, 7);
    }

    #[test]
    fn test_rebase_clamps_to_bounds() {
        // Focus on a synthetic row maps to the first real item
        assert_eq!(rebase_index(0, GridMode::List, GridMode::Paged2, true, 10), 0);
        // Shift past the end clamps to the last slot
        assert_eq!(rebase_index(9, GridMode::Paged3, GridMode::List, true, 4), 3);
    }

    #[test]
    fn test_rebase_empty_level() {
        assert_eq!(rebase_index(5, GridMode::Paged3, GridMode::List, true, 0), 0);
    }

    #[test]
    fn test_rebase_between_paged_modes_is_identity() {
        assert_eq!(rebase_index(4, GridMode::Paged2, GridMode::Paged3, true, 10), 4);
    }
}
