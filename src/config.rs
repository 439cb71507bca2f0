use crate::error::{VitrineError, VitrineResult};

/// How many scroll sections the gallery spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCount {
    /// One section per manifest item (at least one).
    Auto,
    /// A fixed number of sections, independent of the item count.
    Fixed(usize),
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct GalleryConfig {
    pub sections: SectionCount,
    pub smooth_scroll: bool,
    /// World-rig yaw added per section, in radians.
    pub world_turn_per_section: f32,
    /// Depth step between the front slot and the hand-off slot. Negative is
    /// away from the camera.
    pub far_z_step: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            sections: SectionCount::Auto,
            smooth_scroll: true,
            world_turn_per_section: 0.2,
            far_z_step: -8.0,
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> VitrineResult<()> {
        if self.sections == SectionCount::Fixed(0) {
            return Err(VitrineError::validation("sections must be > 0 when fixed"));
        }
        if !self.world_turn_per_section.is_finite() {
            return Err(VitrineError::validation(
                "world_turn_per_section must be finite",
            ));
        }
        if !self.far_z_step.is_finite() {
            return Err(VitrineError::validation("far_z_step must be finite"));
        }
        Ok(())
    }

    /// Effective section count for a gallery of `item_count` items.
    pub fn section_count(&self, item_count: usize) -> usize {
        match self.sections {
            SectionCount::Auto => item_count.max(1),
            SectionCount::Fixed(n) => n.max(1),
        }
    }

    /// Damping factor the host scroll controller should use for its own
    /// scroll smoothing.
    pub fn scroll_damping(&self) -> f32 {
        if self.smooth_scroll { 0.25 } else { 0.01 }
    }
}
