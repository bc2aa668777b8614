use crate::tracking::entity::TrackedEntity;

/// Carries a highlighted device id across a wholesale refresh.
///
/// The previous id survives when the device is still listed; otherwise the
/// first device becomes the highlight, and an empty list clears it.
pub fn retain_selection(previous: Option<&str>, entities: &[TrackedEntity]) -> Option<String> {
    if let Some(id) = previous {
        if entities.iter().any(|entity| entity.id == id) {
            return Some(id.to_string());
        }
    }
    entities.first().map(|entity| entity.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPosition;

    fn devices(ids: &[&str]) -> Vec<TrackedEntity> {
        ids.iter()
            .map(|id| TrackedEntity::new(*id, GeoPosition::new(0.0, 0.0), -70))
            .collect()
    }

    #[test]
    fn keeps_selection_present_after_refresh() {
        let refreshed = devices(&["a", "b", "c"]);
        assert_eq!(retain_selection(Some("b"), &refreshed), Some("b".into()));
    }

    #[test]
    fn falls_back_to_first_device() {
        let refreshed = devices(&["x", "y"]);
        assert_eq!(retain_selection(Some("gone"), &refreshed), Some("x".into()));
        assert_eq!(retain_selection(None, &refreshed), Some("x".into()));
    }

    #[test]
    fn empty_refresh_clears_selection() {
        assert_eq!(retain_selection(Some("a"), &[]), None);
    }
}
