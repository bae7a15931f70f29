use vista_engine::coords::{Rect, Vec2, Viewport};
use vista_engine::paint::Color;
use vista_engine::render::PanelQuad;

const MARGIN: f32 = 8.0;
const HAMBURGER_SIZE: f32 = 40.0;
const HAMBURGER_BAR: f32 = 4.0;
const PANEL_WIDTH: f32 = 220.0;
const ITEM_HEIGHT: f32 = 36.0;
const ITEM_GAP: f32 = 6.0;
const ITEMS_TOP: f32 = MARGIN + HAMBURGER_SIZE + 2.0 * MARGIN;

/// Sidebar element under a point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SidebarHit {
    Hamburger,
    Menu(usize),
}

/// Sidebar colors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SidebarTheme {
    pub panel: Color,
    pub item: Color,
    pub button: Color,
    pub bars: Color,
}

impl Default for SidebarTheme {
    fn default() -> Self {
        Self {
            panel: Color::from_srgb_u8(0x22, 0x26, 0x2e, 0xf0),
            item: Color::from_srgb_u8(0x3a, 0x40, 0x4c, 0xff),
            button: Color::from_srgb_u8(0x2e, 0x34, 0x40, 0xff),
            bars: Color::from_srgb_u8(0xe5, 0xe9, 0xf0, 0xff),
        }
    }
}

/// Sidebar geometry for one viewport, in logical pixels.
///
/// The hamburger button is always at the top-left; the panel hugs the left
/// edge below and behind it when visible, with its entries stacked vertically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SidebarLayout {
    viewport: Viewport,
    visible: bool,
    entries: usize,
}

impl SidebarLayout {
    pub fn new(viewport: Viewport, visible: bool, entries: usize) -> Self {
        Self { viewport, visible, entries }
    }

    pub fn hamburger(&self) -> Rect {
        Rect::new(MARGIN, MARGIN, HAMBURGER_SIZE, HAMBURGER_SIZE)
    }

    /// Panel rectangle; `None` while hidden.
    pub fn panel(&self) -> Option<Rect> {
        self.visible
            .then(|| Rect::new(0.0, 0.0, PANEL_WIDTH.min(self.viewport.width), self.viewport.height))
    }

    /// Rectangle of menu entry `index`; `None` while hidden or out of range.
    pub fn item(&self, index: usize) -> Option<Rect> {
        if !self.visible || index >= self.entries {
            return None;
        }
        let y = ITEMS_TOP + index as f32 * (ITEM_HEIGHT + ITEM_GAP);
        Some(Rect::new(MARGIN, y, PANEL_WIDTH - 2.0 * MARGIN, ITEM_HEIGHT))
    }

    /// Hamburger first, then menu entries.
    pub fn hit_test(&self, pos: Vec2) -> Option<SidebarHit> {
        if self.hamburger().contains(pos) {
            return Some(SidebarHit::Hamburger);
        }
        (0..self.entries)
            .find(|&i| self.item(i).is_some_and(|r| r.contains(pos)))
            .map(SidebarHit::Menu)
    }

    /// Back-to-front quads for the panel renderer.
    pub fn quads(&self, theme: &SidebarTheme) -> Vec<PanelQuad> {
        let mut out = Vec::with_capacity(self.entries + 5);

        if let Some(panel) = self.panel() {
            out.push(PanelQuad::new(panel, theme.panel));
            out.extend(
                (0..self.entries)
                    .filter_map(|i| self.item(i))
                    .map(|r| PanelQuad::new(r, theme.item)),
            );
        }

        let button = self.hamburger();
        out.push(PanelQuad::new(button, theme.button));

        // Three bars, evenly spaced inside the button.
        let inner = button.inset(10.0);
        let step = (inner.size.y - HAMBURGER_BAR) / 2.0;
        for i in 0..3 {
            let y = inner.origin.y + i as f32 * step;
            out.push(PanelQuad::new(
                Rect::new(inner.origin.x, y, inner.size.x, HAMBURGER_BAR),
                theme.bars,
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport { width: 1024.0, height: 768.0 };

    #[test]
    fn hamburger_wins_over_panel() {
        let l = SidebarLayout::new(VP, true, 4);
        assert_eq!(l.hit_test(Vec2::new(20.0, 20.0)), Some(SidebarHit::Hamburger));
    }

    #[test]
    fn entries_stack_without_overlap() {
        let l = SidebarLayout::new(VP, true, 4);
        let rects: Vec<Rect> = (0..4).filter_map(|i| l.item(i)).collect();
        assert_eq!(rects.len(), 4);
        for pair in rects.windows(2) {
            assert!(pair[0].bottom() <= pair[1].origin.y);
        }
        assert!(l.item(4).is_none());
    }

    #[test]
    fn hit_test_finds_each_entry() {
        let l = SidebarLayout::new(VP, true, 4);
        for i in 0..4 {
            let Some(r) = l.item(i) else {
                panic!("entry {i} missing");
            };
            let center = Vec2::new(r.origin.x + r.size.x / 2.0, r.origin.y + r.size.y / 2.0);
            assert_eq!(l.hit_test(center), Some(SidebarHit::Menu(i)));
        }
    }

    #[test]
    fn gaps_and_canvas_area_miss() {
        let l = SidebarLayout::new(VP, true, 4);
        assert_eq!(l.hit_test(Vec2::new(600.0, 300.0)), None);
        let Some(first) = l.item(0) else {
            panic!("entry 0 missing");
        };
        assert_eq!(l.hit_test(Vec2::new(20.0, first.bottom() + 1.0)), None);
    }

    #[test]
    fn hidden_layout_only_draws_the_button() {
        let l = SidebarLayout::new(VP, false, 4);
        assert!(l.panel().is_none());
        assert_eq!(l.quads(&SidebarTheme::default()).len(), 4);
    }

    #[test]
    fn visible_layout_draws_panel_entries_and_button() {
        let l = SidebarLayout::new(VP, true, 4);
        let quads = l.quads(&SidebarTheme::default());
        assert_eq!(quads.len(), 1 + 4 + 4);
        assert_eq!(Some(quads[0].rect), l.panel());
    }
}
