use crate::radar::config::ScreenPoint;
use crate::tracking::TrackedEntity;

const TITLE_LIMIT: usize = 20;
const ANCHOR_GAP: f64 = 15.0;
const EDGE_INSET: f64 = 5.0;

/// Text lines shown next to a highlighted device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub signal: String,
    pub address: String,
}

impl TooltipContent {
    pub fn for_entity(entity: &TrackedEntity) -> Self {
        let title = match entity.display_name.as_deref() {
            Some(name) if !name.is_empty() => truncate(name, TITLE_LIMIT),
            _ => "Hidden SSID".to_string(),
        };
        let address = if entity.id.is_empty() {
            "UNKNOWN MAC".to_string()
        } else {
            entity.id.clone()
        };
        Self {
            title,
            signal: format!("{} dBm", entity.signal_strength),
            address,
        }
    }

    pub fn lines(&self) -> [&str; 3] {
        [&self.title, &self.signal, &self.address]
    }

    /// Longest line in characters; hosts multiply by their glyph width.
    pub fn widest_line(&self) -> usize {
        self.lines()
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Box placement for a tooltip on a square canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipLayout {
    pub origin: ScreenPoint,
    pub width: f64,
    pub height: f64,
}

impl TooltipLayout {
    /// Positions the box below-right of `anchor`, flipping to the other side
    /// of the anchor when it would overflow `canvas_size`, then clamping to
    /// the canvas inset.
    pub fn place(anchor: ScreenPoint, width: f64, height: f64, canvas_size: f64) -> Self {
        let mut x = anchor.x + ANCHOR_GAP;
        let mut y = anchor.y + ANCHOR_GAP;

        if x + width > canvas_size {
            x = anchor.x - width - ANCHOR_GAP;
        }
        if x < EDGE_INSET {
            x = EDGE_INSET;
        }
        if x + width > canvas_size {
            x = canvas_size - width - EDGE_INSET;
        }
        if y + height > canvas_size {
            y = anchor.y - height - ANCHOR_GAP;
        }
        if y < EDGE_INSET {
            y = EDGE_INSET;
        }

        Self {
            origin: ScreenPoint::new(x, y),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPosition;

    #[test]
    fn content_falls_back_for_hidden_networks() {
        let entity = TrackedEntity::new("", GeoPosition::new(0.0, 0.0), -77);
        let content = TooltipContent::for_entity(&entity);
        assert_eq!(content.lines(), ["Hidden SSID", "-77 dBm", "UNKNOWN MAC"]);
    }

    #[test]
    fn long_names_are_truncated() {
        let entity = TrackedEntity::new("aa:bb:cc:dd:ee:ff", GeoPosition::new(0.0, 0.0), -50)
            .with_display_name("Guest-Network-Floor-Three-East");
        let content = TooltipContent::for_entity(&entity);
        assert_eq!(content.title, "Guest-Network-Floor-...");
        assert_eq!(content.widest_line(), 23);
    }

    #[test]
    fn default_placement_is_below_right() {
        let layout = TooltipLayout::place(ScreenPoint::new(100.0, 100.0), 120.0, 57.0, 450.0);
        assert_eq!(layout.origin, ScreenPoint::new(115.0, 115.0));
    }

    #[test]
    fn flips_near_right_and_bottom_edges() {
        let layout = TooltipLayout::place(ScreenPoint::new(400.0, 420.0), 120.0, 57.0, 450.0);
        assert_eq!(layout.origin, ScreenPoint::new(265.0, 348.0));
    }

    #[test]
    fn oversized_box_is_clamped_to_inset() {
        let layout = TooltipLayout::place(ScreenPoint::new(50.0, 20.0), 440.0, 500.0, 450.0);
        assert_eq!(layout.origin.x, 5.0);
        assert_eq!(layout.origin.y, 5.0);
    }
}
