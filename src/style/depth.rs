//! Depth → colour brackets shared by marker styling and the legend.

use super::Color;
use once_cell::sync::Lazy;

/// One depth range of the colour scale. The bracket covers depths strictly
/// greater than `grade` up to the next bracket's grade; the lowest bracket
/// also takes everything at or below its upper neighbour's grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBracket {
    /// Lower bound in kilometres, as shown in the legend
    pub grade: f64,
    pub color: Color,
}

impl DepthBracket {
    pub const fn new(grade: f64, color: Color) -> Self {
        Self { grade, color }
    }
}

/// Ordered (ascending) list of depth brackets
#[derive(Debug, Clone, PartialEq)]
pub struct DepthScale {
    brackets: Vec<DepthBracket>,
}

/// The seven-bracket scale used for markers and legend alike.
pub static DEPTH_SCALE: Lazy<DepthScale> = Lazy::new(|| {
    DepthScale::new(vec![
        DepthBracket::new(0.0, Color::rgb(0xFE, 0xD9, 0x76)),
        DepthBracket::new(10.0, Color::rgb(0xFE, 0xB2, 0x4C)),
        DepthBracket::new(20.0, Color::rgb(0xFD, 0x8D, 0x3C)),
        DepthBracket::new(50.0, Color::rgb(0xFC, 0x4E, 0x2A)),
        DepthBracket::new(100.0, Color::rgb(0xE3, 0x1A, 0x1C)),
        DepthBracket::new(200.0, Color::rgb(0xBD, 0x00, 0x26)),
        DepthBracket::new(300.0, Color::rgb(0x80, 0x00, 0x26)),
    ])
});

impl DepthScale {
    /// Brackets must be sorted by ascending grade and non-empty.
    pub fn new(brackets: Vec<DepthBracket>) -> Self {
        debug_assert!(!brackets.is_empty());
        debug_assert!(brackets.windows(2).all(|w| w[0].grade < w[1].grade));
        Self { brackets }
    }

    pub fn brackets(&self) -> &[DepthBracket] {
        &self.brackets
    }

    pub fn grades(&self) -> impl Iterator<Item = f64> + '_ {
        self.brackets.iter().map(|b| b.grade)
    }

    /// Bracket for a depth: scanning from the deepest grade down, the first
    /// grade strictly below `depth` wins. A depth equal to a grade therefore
    /// belongs to the next shallower bracket. Everything else, NaN included,
    /// falls into the shallowest bracket.
    pub fn bracket_for(&self, depth: f64) -> &DepthBracket {
        self.brackets
            .iter()
            .rev()
            .find(|bracket| depth > bracket.grade)
            .unwrap_or(&self.brackets[0])
    }

    pub fn color(&self, depth: f64) -> Color {
        self.bracket_for(depth).color
    }

    /// Legend label of the bracket at `index`: `"10–19"`, or `"300+"` for the
    /// open-ended last one.
    pub fn label(&self, index: usize) -> Option<String> {
        let bracket = self.brackets.get(index)?;
        Some(match self.brackets.get(index + 1) {
            Some(next) => format!("{}–{}", bracket.grade, next.grade - 1.0),
            None => format!("{}+", bracket.grade),
        })
    }
}

/// Fill colour for an earthquake at `depth` kilometres.
pub fn depth_color(depth: f64) -> Color {
    DEPTH_SCALE.color(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(depth: f64) -> String {
        depth_color(depth).to_hex()
    }

    #[test]
    fn test_bracket_colors() {
        assert_eq!(hex(500.0), "#800026");
        assert_eq!(hex(250.0), "#BD0026");
        assert_eq!(hex(150.0), "#E31A1C");
        assert_eq!(hex(75.0), "#FC4E2A");
        assert_eq!(hex(35.0), "#FD8D3C");
        assert_eq!(hex(12.5), "#FEB24C");
        assert_eq!(hex(5.0), "#FED976");
    }

    #[test]
    fn test_threshold_belongs_to_shallower_bracket() {
        assert_eq!(hex(300.0), "#BD0026");
        assert_eq!(hex(300.0001), "#800026");
        assert_eq!(hex(200.0), "#E31A1C");
        assert_eq!(hex(100.0), "#FC4E2A");
        assert_eq!(hex(50.0), "#FD8D3C");
        assert_eq!(hex(20.0), "#FEB24C");
        assert_eq!(hex(10.0), "#FED976");
        assert_eq!(hex(10.0001), "#FEB24C");
    }

    #[test]
    fn test_shallow_and_negative_depths() {
        assert_eq!(hex(0.0), "#FED976");
        assert_eq!(hex(-2.3), "#FED976");
        assert_eq!(hex(f64::NAN), "#FED976");
    }

    #[test]
    fn test_intensity_increases_with_depth() {
        // walking the boundaries upwards never goes back to a shallower bracket
        let probes = [0.0, 10.5, 20.5, 50.5, 100.5, 200.5, 300.5];
        let indices: Vec<usize> = probes
            .iter()
            .map(|d| {
                let color = depth_color(*d);
                DEPTH_SCALE
                    .brackets()
                    .iter()
                    .position(|b| b.color == color)
                    .unwrap()
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = (0..DEPTH_SCALE.brackets().len())
            .map(|i| DEPTH_SCALE.label(i).unwrap())
            .collect();
        assert_eq!(
            labels,
            vec!["0–9", "10–19", "20–49", "50–99", "100–199", "200–299", "300+"]
        );
        assert!(DEPTH_SCALE.label(7).is_none());
    }

    #[test]
    fn test_grades() {
        let grades: Vec<f64> = DEPTH_SCALE.grades().collect();
        assert_eq!(grades, vec![0.0, 10.0, 20.0, 50.0, 100.0, 200.0, 300.0]);
    }
}
