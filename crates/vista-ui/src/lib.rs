//! Vista UI — the viewer's sidebar and user-facing notices on top of `vista-engine`.
//!
//! Nothing here touches the GPU directly: the sidebar produces [`PanelQuad`]s
//! for the engine's panel renderer, and failures become [`Notice`]s that the
//! viewer presents.
//!
//! [`PanelQuad`]: vista_engine::render::PanelQuad

pub mod layout;
pub mod menu;
pub mod notice;
pub mod sidebar;

pub use layout::{SidebarHit, SidebarLayout, SidebarTheme};
pub use menu::{MENU_ENTRIES, MenuAction};
pub use notice::Notice;
pub use sidebar::{SIDEBAR_BREAKPOINT, SidebarClasses, SidebarController, SidebarResponse};
