use std::collections::BTreeMap;

use glam::Vec3;

use crate::{
    config::GalleryConfig,
    damp::DampedPose,
    manifest::Manifest,
    overrides::{OverrideStack, PoseOverride},
    pose::{baseline_pose, pose_target},
    scroll::ScrollSnapshot,
    window::{Role, role_of, visible_window},
};

/// Idle pivot spin, radians per second. Reported separately from the damped
/// pose so hosts apply it to an inner pivot that the damper never touches.
pub const IDLE_SPIN_RATE: f32 = 0.35;

/// Everything the host needs to draw one frame. A plain value: safe to send
/// across threads, serialize, or diff in tests.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Frame {
    pub scroll: ScrollSnapshot,
    /// Yaw of the whole gallery rig.
    pub world_yaw: f32,
    /// Visible items only, window order (current first).
    pub items: Vec<ItemFrame>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct ItemFrame {
    /// Index into the manifest.
    pub index: usize,
    pub file: String,
    pub role: Role,
    pub position: Vec3,
    /// Euler XYZ (pitch, yaw, roll), radians.
    pub rotation: Vec3,
    pub scale: f32,
    /// Applied by the host to every drawable part of the item.
    pub opacity: f32,
    /// Accumulated inner-pivot yaw.
    pub idle_yaw: f32,
}

#[derive(Clone, Debug)]
struct ItemState {
    pose: DampedPose,
    idle_yaw: f32,
    reset_seen: u64,
}

/// The per-frame orchestrator. Owns all per-item animation state; state
/// exists only while an item is inside the visibility window and is
/// recreated at the baseline pose when the item re-enters.
pub struct Animator {
    config: GalleryConfig,
    manifest: Manifest,
    overrides: OverrideStack,
    states: BTreeMap<usize, ItemState>,
    scroll: ScrollSnapshot,
}

impl Animator {
    pub fn new(config: GalleryConfig, manifest: Manifest) -> Self {
        let sections = config.section_count(manifest.len());
        Self {
            config,
            manifest,
            overrides: OverrideStack::default(),
            states: BTreeMap::new(),
            scroll: ScrollSnapshot::map(0.0, sections),
        }
    }

    /// Installs the compile-time default override table.
    #[must_use]
    pub fn with_compiled_overrides(mut self, table: BTreeMap<String, PoseOverride>) -> Self {
        self.overrides.compiled = table;
        self
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn section_count(&self) -> usize {
        self.config.section_count(self.manifest.len())
    }

    /// Last computed scroll snapshot.
    pub fn scroll(&self) -> ScrollSnapshot {
        self.scroll
    }

    /// Authoring channel: merges the `Some` fields of `patch` into the
    /// runtime override for `file`. Visible on the very next frame, and
    /// bumps the reset signal so the change lands instantaneously.
    pub fn set_override(&mut self, file: impl Into<String>, patch: PoseOverride) {
        self.overrides.runtime.set(file, patch);
    }

    pub fn remove_override(&mut self, file: &str) {
        self.overrides.runtime.remove(file);
    }

    /// Snaps every mounted item back to its baseline pose on the next
    /// frame.
    pub fn reset_pose(&mut self) {
        self.overrides.runtime.bump_reset();
    }

    /// Current runtime override table, minus no-op entries, for export.
    pub fn overrides_snapshot(&self) -> BTreeMap<String, PoseOverride> {
        self.overrides.runtime.export()
    }

    /// Advances one frame: maps `progress` onto the section cursor, mounts
    /// and unmounts items as the visibility window moves, and steps every
    /// mounted item's damped channels by `dt` seconds.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn advance(&mut self, progress: f32, dt: f32) -> Frame {
        let sections = self.section_count();
        let scroll = ScrollSnapshot::map(progress, sections);
        self.scroll = scroll;

        let world_yaw = scroll.world_yaw(self.config.world_turn_per_section);
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let mut items = Vec::with_capacity(4);
        if !self.manifest.is_empty() {
            let last_item = self.manifest.len() - 1;
            let window = visible_window(scroll.active_index, sections);
            let reset_version = self.overrides.runtime.reset_version();

            // Section indices past the item list clamp to the last item;
            // duplicates collapse with the first (highest-priority) role.
            let mut mounted: Vec<usize> = Vec::with_capacity(4);
            for &section_index in &window {
                let item_index = section_index.min(last_item);
                if mounted.contains(&item_index) {
                    continue;
                }
                mounted.push(item_index);

                let role = role_of(section_index, scroll.active_index);
                let distance = scroll.active_index.saturating_sub(section_index);
                let item = &self.manifest.items[item_index];
                let ov = self.overrides.resolve(&item.file);
                let target =
                    pose_target(role, scroll.local_t, distance, self.config.far_z_step, &ov);

                let state = self.states.entry(item_index).or_insert_with(|| {
                    tracing::trace!(file = %item.file, "mount");
                    ItemState {
                        pose: DampedPose::snapped_to(&baseline_pose(&ov)),
                        idle_yaw: 0.0,
                        reset_seen: reset_version,
                    }
                });
                if state.reset_seen != reset_version {
                    state.pose = DampedPose::snapped_to(&baseline_pose(&ov));
                    state.reset_seen = reset_version;
                }

                state.pose.step_toward(&target, dt);
                state.idle_yaw += dt * IDLE_SPIN_RATE;

                items.push(ItemFrame {
                    index: item_index,
                    file: item.file.clone(),
                    role,
                    position: state.pose.position,
                    rotation: state.pose.rotation,
                    scale: state.pose.scale,
                    opacity: state.pose.opacity,
                    idle_yaw: state.idle_yaw,
                });
            }

            // Items that left the window drop their animation state; they
            // restart from the baseline if they come back.
            self.states.retain(|index, _| mounted.contains(index));
        }

        Frame {
            scroll,
            world_yaw,
            items,
        }
    }
}
