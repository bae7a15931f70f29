use vista_engine::coords::{Vec2, Viewport};

use crate::layout::{SidebarHit, SidebarLayout};
use crate::menu::{MENU_ENTRIES, MenuAction};

/// Viewport width (logical px) at or below which the sidebar starts hidden.
pub const SIDEBAR_BREAKPOINT: f32 = 700.0;

/// Visibility class set of the navigation panel.
///
/// The panel is visible iff `hide` is absent. `show` only records that the
/// panel was opened by hand on a narrow viewport.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SidebarClasses {
    pub show: bool,
    pub hide: bool,
}

impl SidebarClasses {
    #[inline]
    pub fn is_visible(self) -> bool {
        !self.hide
    }
}

/// What a click on the window meant for the sidebar.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SidebarResponse {
    /// The click missed every sidebar element.
    Ignored,
    /// The hamburger button flipped the panel.
    Toggled,
    /// A menu entry was chosen.
    Menu(MenuAction),
}

/// Responsive sidebar state.
///
/// Owns its class set; the viewport is always passed in explicitly.
#[derive(Debug, Default)]
pub struct SidebarController {
    classes: SidebarClasses,
}

impl SidebarController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> SidebarClasses {
        self.classes
    }

    pub fn is_visible(&self) -> bool {
        self.classes.is_visible()
    }

    /// Resets the default state for `width`; call on load and on every resize.
    ///
    /// Narrow viewports start hidden, wide ones shown with no manual toggle.
    pub fn on_viewport(&mut self, width: f32) {
        if width <= SIDEBAR_BREAKPOINT {
            self.classes.hide = true;
            self.classes.show = false;
        } else {
            self.classes.hide = false;
            self.classes.show = false;
        }
        log::debug!("sidebar at width {width}: {:?}", self.classes);
    }

    /// Flips both classes, independently of the viewport width.
    pub fn toggle(&mut self) {
        self.classes.show = !self.classes.show;
        self.classes.hide = !self.classes.hide;
    }

    /// Layout for the current state.
    pub fn layout(&self, viewport: Viewport) -> SidebarLayout {
        SidebarLayout::new(viewport, self.is_visible(), MENU_ENTRIES.len())
    }

    /// Routes a click: hamburger first, then menu entries (only when visible).
    pub fn on_click(&mut self, pos: Vec2, viewport: Viewport) -> SidebarResponse {
        match self.layout(viewport).hit_test(pos) {
            Some(SidebarHit::Hamburger) => {
                self.toggle();
                SidebarResponse::Toggled
            }
            Some(SidebarHit::Menu(index)) => SidebarResponse::Menu(MenuAction::from_index(index)),
            None => SidebarResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_at(width: f32) -> SidebarController {
        let mut c = SidebarController::new();
        c.on_viewport(width);
        c
    }

    #[test]
    fn narrow_viewports_start_hidden() {
        for w in [0.0, 320.0, 699.5, 700.0] {
            let c = controller_at(w);
            assert!(!c.is_visible(), "width {w}");
            assert_eq!(c.classes(), SidebarClasses { show: false, hide: true });
        }
    }

    #[test]
    fn wide_viewports_are_shown_and_untoggled() {
        for w in [700.5, 701.0, 1920.0] {
            let c = controller_at(w);
            assert!(c.is_visible(), "width {w}");
            assert_eq!(c.classes(), SidebarClasses::default());
        }
    }

    #[test]
    fn resize_resets_manual_toggle() {
        let mut c = controller_at(1024.0);
        c.toggle();
        assert!(!c.is_visible());

        c.on_viewport(1200.0);
        assert!(c.is_visible());
        assert_eq!(c.classes(), SidebarClasses::default());

        c.toggle();
        c.on_viewport(600.0);
        assert_eq!(c.classes(), SidebarClasses { show: false, hide: true });
    }

    #[test]
    fn toggle_parity() {
        for width in [480.0, 1280.0] {
            let start = controller_at(width);
            for n in 0..6 {
                let mut c = controller_at(width);
                for _ in 0..n {
                    c.toggle();
                }
                if n % 2 == 0 {
                    assert_eq!(c.classes(), start.classes(), "{n} toggles at {width}");
                } else {
                    assert_ne!(c.is_visible(), start.is_visible(), "{n} toggles at {width}");
                }
            }
        }
    }

    #[test]
    fn hamburger_click_toggles() {
        let vp = Viewport::new(480.0, 800.0);
        let mut c = controller_at(vp.width);
        let hamburger = c.layout(vp).hamburger();
        let center = Vec2::new(
            hamburger.origin.x + hamburger.size.x / 2.0,
            hamburger.origin.y + hamburger.size.y / 2.0,
        );

        assert_eq!(c.on_click(center, vp), SidebarResponse::Toggled);
        assert!(c.is_visible());
        assert_eq!(c.on_click(center, vp), SidebarResponse::Toggled);
        assert!(!c.is_visible());
    }

    #[test]
    fn menu_click_never_toggles() {
        let vp = Viewport::new(1280.0, 800.0);
        let mut c = controller_at(vp.width);
        let before = c.classes();

        let Some(item) = c.layout(vp).item(1) else {
            panic!("menu entry 1 should be laid out when the panel is visible");
        };
        let pos = Vec2::new(item.origin.x + 4.0, item.origin.y + 4.0);

        assert_eq!(c.on_click(pos, vp), SidebarResponse::Menu(MenuAction::from_index(1)));
        assert_eq!(c.classes(), before);
    }

    #[test]
    fn hidden_menu_is_not_clickable() {
        let vp = Viewport::new(480.0, 800.0);
        let mut c = controller_at(vp.width);
        let visible = SidebarLayout::new(vp, true, MENU_ENTRIES.len());
        let Some(item) = visible.item(0) else {
            panic!("entry 0 exists when visible");
        };
        let pos = Vec2::new(item.origin.x + 4.0, item.origin.y + 4.0);

        assert_eq!(c.on_click(pos, vp), SidebarResponse::Ignored);
    }
}
