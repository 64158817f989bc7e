//! Screen implementations. Each screen is a top-level Component.

mod clients;
mod export;
mod overview;
mod router;
mod traffic;

pub use clients::ClientsScreen;
pub use export::ExportScreen;
pub use overview::OverviewScreen;
pub use router::RouterScreen;
pub use traffic::TrafficScreen;

use crate::component::Component;
use crate::screen::ScreenId;

/// Instantiate every screen, keyed by its [`ScreenId`].
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Overview, Box::new(OverviewScreen::new())),
        (ScreenId::Clients, Box::new(ClientsScreen::new())),
        (ScreenId::Traffic, Box::new(TrafficScreen::new())),
        (ScreenId::Router, Box::new(RouterScreen::new())),
        (ScreenId::Export, Box::new(ExportScreen::new())),
    ]
}
