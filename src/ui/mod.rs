pub mod controls;
pub mod legend;
pub mod popup;

#[cfg(feature = "egui")]
pub mod widget;

pub use controls::{ControlPosition, LayerControl};
pub use legend::{Legend, LegendEntry};
pub use popup::{Popup, PopupContent, PopupManager};

#[cfg(feature = "egui")]
pub use widget::MapWidget;
