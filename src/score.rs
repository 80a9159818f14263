/// Points collected in the current session. Never decreases.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ScoreTracker {
    points: u32,
}

impl ScoreTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one point for a consumed food item.
    pub fn increment(&mut self) {
        self.points = self.points.saturating_add(1);
    }

    #[must_use]
    pub fn points(self) -> u32 {
        self.points
    }
}
