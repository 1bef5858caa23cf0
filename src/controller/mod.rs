pub mod app;
pub mod disclosure;
pub mod featured;
pub mod focus;
pub mod images;
pub mod navigation;
pub mod rows;
pub mod screens;

pub use self::app::{App, AppEvent, ImageTicket, ScreenTag};

// Home screen focus layout. Row 0 is the hero, then one row per rendered
// container in display order. Empty containers keep their row but are
// skipped when moving up or down.
//
// ╔══════════════════════════════════════════╗
// ║ HERO@<featured>                          ║
// ╠══════════╦══════════╦══════════╦═════════╣
// ║ row@a    ║ row@b    ║ row@c    ║ ...     ║
// ╠══════════╩══════════╩══════════╩═════════╣
// ║ (empty container)                        ║
// ╠═════════════════╦═════════════════╦══════╣
// ║ row2@d          ║ row2@e          ║ ...  ║
// ╚═════════════════╩═════════════════╩══════╝
//
// Details screen: D-pad up/down walks the expandable sections, South
// toggles the focused one, East goes back.
