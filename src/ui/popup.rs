use crate::core::geo::LatLng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "egui")]
use egui::{Color32, FontId, Pos2, Rect, Ui, Vec2};

const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

/// What an earthquake popup says, one line per entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupContent {
    /// Place name as published by the feed
    pub title: String,
    /// Origin time, already formatted
    pub time: String,
    pub magnitude: f64,
    pub depth: f64,
}

impl PopupContent {
    pub fn new(place: Option<&str>, time_millis: Option<i64>, magnitude: f64, depth: f64) -> Self {
        Self {
            title: place.unwrap_or("Unknown location").to_string(),
            time: format_time(time_millis),
            magnitude,
            depth,
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            self.title.clone(),
            self.time.clone(),
            format!("Magnitude: {}", self.magnitude),
            format!("Depth: {}", self.depth),
        ]
    }
}

impl fmt::Display for PopupContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Renders epoch milliseconds as a readable UTC timestamp
pub fn format_time(time_millis: Option<i64>) -> String {
    time_millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "Unknown time".to_string())
}

#[cfg(feature = "egui")]
#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background_color: Color32,
    pub border_color: Color32,
    pub text_color: Color32,
    pub border_width: f32,
    pub rounding: f32,
    pub padding: f32,
    pub font_size: f32,
    /// Gap between the anchor point and the bubble
    pub offset: f32,
}

#[cfg(feature = "egui")]
impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            border_color: Color32::GRAY,
            text_color: Color32::BLACK,
            border_width: 1.0,
            rounding: 4.0,
            padding: 8.0,
            font_size: 12.0,
            offset: 10.0,
        }
    }
}

/// An open popup anchored to a map position
#[derive(Debug, Clone)]
pub struct Popup {
    /// Id of the marker the popup belongs to
    pub marker_id: String,
    pub position: LatLng,
    pub content: PopupContent,
}

impl Popup {
    pub fn new(marker_id: impl Into<String>, position: LatLng, content: PopupContent) -> Self {
        Self {
            marker_id: marker_id.into(),
            position,
            content,
        }
    }

    /// Draws the popup with its bottom edge centred just above `anchor`.
    /// Returns the rectangle it occupies.
    #[cfg(feature = "egui")]
    pub fn paint(&self, ui: &Ui, anchor: Pos2, style: &PopupStyle) -> Rect {
        let font_id = FontId::proportional(style.font_size);
        let [title, time, magnitude, depth] = self.content.lines();
        let heading = ui.fonts(|f| {
            f.layout_no_wrap(title, FontId::proportional(style.font_size + 2.0), style.text_color)
        });
        let body = ui.fonts(|f| {
            f.layout_no_wrap(
                format!("{time}\n{magnitude}\n{depth}"),
                font_id,
                style.text_color,
            )
        });

        let rule_gap = 6.0;
        let inner = Vec2::new(
            heading.size().x.max(body.size().x),
            heading.size().y + rule_gap * 2.0 + body.size().y,
        );
        let size = inner + Vec2::splat(style.padding * 2.0);
        let min = Pos2::new(anchor.x - size.x / 2.0, anchor.y - style.offset - size.y);
        let rect = Rect::from_min_size(min, size);

        let painter = ui.painter();
        painter.rect_filled(rect, style.rounding, style.background_color);
        painter.rect_stroke(
            rect,
            style.rounding,
            (style.border_width, style.border_color),
        );

        let content_min = rect.min + Vec2::splat(style.padding);
        let rule_y = content_min.y + heading.size().y + rule_gap;
        painter.galley(content_min, heading, style.text_color);
        painter.hline(
            content_min.x..=content_min.x + inner.x,
            rule_y,
            (1.0, style.border_color),
        );
        painter.galley(
            Pos2::new(content_min.x, rule_y + rule_gap),
            body,
            style.text_color,
        );

        rect
    }
}

/// Holds the popup currently open on the map. Opening one closes any other.
#[derive(Debug, Clone, Default)]
pub struct PopupManager {
    open: Option<Popup>,
}

impl PopupManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, popup: Popup) {
        log::debug!("open popup for {}", popup.marker_id);
        self.open = Some(popup);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn current(&self) -> Option<&Popup> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_text() {
        let content = PopupContent::new(Some("Test Location"), Some(0), 5.2, 12.5);
        let text = content.to_string();

        assert_eq!(
            text,
            "Test Location\nThu Jan 01 1970 00:00:00 UTC\nMagnitude: 5.2\nDepth: 12.5"
        );
    }

    #[test]
    fn test_raw_values_are_not_rounded() {
        let content = PopupContent::new(Some("Somewhere"), None, 1.23, 7.0);
        let text = content.to_string();

        assert!(text.contains("Magnitude: 1.23"));
        assert!(text.contains("Depth: 7"));
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let content = PopupContent::new(None, None, 0.0, 0.0);
        assert_eq!(content.title, "Unknown location");
        assert_eq!(content.time, "Unknown time");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(
            format_time(Some(1_700_000_000_000)),
            "Tue Nov 14 2023 22:13:20 UTC"
        );
    }

    #[test]
    fn test_popup_manager_keeps_single_popup() {
        let mut manager = PopupManager::new();
        assert!(!manager.is_open());

        let content = PopupContent::new(Some("A"), None, 1.0, 1.0);
        manager.open(Popup::new("a", LatLng::new(1.0, 1.0), content.clone()));
        manager.open(Popup::new("b", LatLng::new(2.0, 2.0), content));

        assert_eq!(manager.current().map(|p| p.marker_id.as_str()), Some("b"));
        manager.close();
        assert!(manager.current().is_none());
    }
}
