use crate::notice::Notice;

/// Sidebar menu entries, top to bottom.
pub const MENU_ENTRIES: [&str; 4] = ["Gallery", "Adjust", "Export", "About"];

/// Number of entries reserved for actions that are not wired up yet.
const PLACEHOLDER_COUNT: usize = 3;

/// Action behind a sidebar menu entry, addressed by its index.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MenuAction {
    /// One of the first three entries. Reachable and distinct, but inert.
    Placeholder(usize),
    /// Any other entry; answered with a generic notice.
    Unassigned(usize),
}

impl MenuAction {
    pub fn from_index(index: usize) -> Self {
        if index < PLACEHOLDER_COUNT {
            MenuAction::Placeholder(index)
        } else {
            MenuAction::Unassigned(index)
        }
    }

    pub fn index(self) -> usize {
        match self {
            MenuAction::Placeholder(i) | MenuAction::Unassigned(i) => i,
        }
    }

    pub fn label(self) -> &'static str {
        MENU_ENTRIES.get(self.index()).copied().unwrap_or("?")
    }

    /// Runs the action and returns what the user should be told, if anything.
    pub fn activate(self) -> Option<Notice> {
        match self {
            MenuAction::Placeholder(i) => {
                log::debug!("menu entry {i} ({}) has no action yet", self.label());
                None
            }
            MenuAction::Unassigned(index) => Some(Notice::MenuOption { index }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_three_indices_are_distinct_placeholders() {
        let actions: Vec<_> = (0..3).map(MenuAction::from_index).collect();
        assert_eq!(
            actions,
            vec![
                MenuAction::Placeholder(0),
                MenuAction::Placeholder(1),
                MenuAction::Placeholder(2),
            ]
        );
        assert!(actions.iter().all(|a| a.activate().is_none()));
    }

    #[test]
    fn other_indices_fall_through_to_notice() {
        for i in [3, 4, 99] {
            let action = MenuAction::from_index(i);
            assert_eq!(action, MenuAction::Unassigned(i));
            assert_eq!(action.activate(), Some(Notice::MenuOption { index: i }));
        }
    }

    #[test]
    fn labels_follow_entries() {
        assert_eq!(MenuAction::from_index(0).label(), "Gallery");
        assert_eq!(MenuAction::from_index(3).label(), "About");
        assert_eq!(MenuAction::from_index(12).label(), "?");
    }
}
