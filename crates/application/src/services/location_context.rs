//! Session-scoped location slot
//!
//! Holds the most recently resolved place for one conversation. Written by
//! city resolution, read by the current-weather lookup.

use domain::Location;
use parking_lot::RwLock;

/// Single-slot holder for the last resolved location
#[derive(Debug, Default)]
pub struct LocationContext {
    slot: RwLock<Option<Location>>,
}

impl LocationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored location, if any
    pub fn get(&self) -> Option<Location> {
        self.slot.read().clone()
    }

    /// Store a location, replacing any previous one
    pub fn set(&self, location: Location) {
        *self.slot.write() = Some(location);
    }

    /// Forget the stored location
    pub fn clear(&self) {
        self.slot.write().take();
    }

    /// Whether a location is stored
    pub fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Coordinates;

    fn paris() -> Location {
        Location::new(
            "Paris",
            "France",
            "Île-de-France",
            Coordinates::new(48.85, 2.35).expect("valid"),
        )
    }

    #[test]
    fn starts_empty() {
        let ctx = LocationContext::new();
        assert!(ctx.get().is_none());
        assert!(!ctx.is_set());
    }

    #[test]
    fn set_overwrites() {
        let ctx = LocationContext::new();
        ctx.set(paris());
        let tokyo = Location::new(
            "Tokyo",
            "Japan",
            "Tokyo",
            Coordinates::new(35.69, 139.69).expect("valid"),
        );
        ctx.set(tokyo.clone());
        assert_eq!(ctx.get(), Some(tokyo));
    }

    #[test]
    fn clear_empties_slot() {
        let ctx = LocationContext::new();
        ctx.set(paris());
        ctx.clear();
        assert!(ctx.get().is_none());
    }
}
