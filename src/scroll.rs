/// Per-frame scroll state, derived once by the animator and handed out by
/// value so readers never observe `progress` and `active_index` from
/// different frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSnapshot {
    /// Raw scroll progress, clamped to [0, 1].
    pub progress: f32,
    /// `progress * sections`.
    pub page: f32,
    /// Section currently in front, in `[0, sections-1]`.
    pub active_index: usize,
    /// Position within the active section, in [0, 1].
    pub local_t: f32,
}

impl ScrollSnapshot {
    /// Maps a scroll progress value onto `(active_index, local_t)` for a
    /// gallery of `sections` sections. Monotonic in `progress`; stable at
    /// both ends (no overshoot past the valid index range).
    pub fn map(progress: f32, sections: usize) -> Self {
        let sections = sections.max(1);
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let page = progress * sections as f32;
        let active_index = (page.floor() as usize).min(sections - 1);
        let local_t = (page - active_index as f32).clamp(0.0, 1.0);

        Self {
            progress,
            page,
            active_index,
            local_t,
        }
    }

    /// Yaw of the whole gallery rig: `world_turn_per_section` radians per
    /// section, swept continuously through the active section.
    pub fn world_yaw(&self, world_turn_per_section: f32) -> f32 {
        (self.active_index as f32 + self.local_t) * world_turn_per_section
    }
}
