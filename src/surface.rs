use crate::animator::ItemFrame;

/// The host rendering backend. The core never inspects renderable
/// internals; it announces window membership and hands over damped values.
///
/// `apply_opacity` is expected to propagate the value to every drawable
/// part of the item (sub-meshes, materials), whatever that means for the
/// backend's scene representation.
pub trait RenderSurface {
    /// An item entered the visibility window; acquire its renderable.
    fn mount(&mut self, index: usize, file: &str);

    /// An item left the visibility window; release its renderable.
    fn unmount(&mut self, index: usize, file: &str);

    /// Yaw for the whole gallery rig, once per frame.
    fn set_world_yaw(&mut self, yaw: f32);

    /// Damped world transform and idle-pivot yaw for one visible item.
    fn apply_pose(&mut self, item: &ItemFrame);

    /// Damped opacity for one visible item, fanned out to all its drawable
    /// parts.
    fn apply_opacity(&mut self, index: usize, file: &str, opacity: f32);

    /// Attach the bounding-box debug overlay to an item.
    fn attach_bounds_overlay(&mut self, index: usize, file: &str);

    /// Detach the bounding-box debug overlay from an item.
    fn detach_bounds_overlay(&mut self, index: usize, file: &str);
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn mount(&mut self, index: usize, file: &str) {
        (**self).mount(index, file);
    }

    fn unmount(&mut self, index: usize, file: &str) {
        (**self).unmount(index, file);
    }

    fn set_world_yaw(&mut self, yaw: f32) {
        (**self).set_world_yaw(yaw);
    }

    fn apply_pose(&mut self, item: &ItemFrame) {
        (**self).apply_pose(item);
    }

    fn apply_opacity(&mut self, index: usize, file: &str, opacity: f32) {
        (**self).apply_opacity(index, file, opacity);
    }

    fn attach_bounds_overlay(&mut self, index: usize, file: &str) {
        (**self).attach_bounds_overlay(index, file);
    }

    fn detach_bounds_overlay(&mut self, index: usize, file: &str) {
        (**self).detach_bounds_overlay(index, file);
    }
}

/// What a [`RecordingSurface`] saw. Ordered exactly as the session issued
/// the calls.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    Mount { index: usize, file: String },
    Unmount { index: usize, file: String },
    WorldYaw(f32),
    Pose { index: usize, opacity_of_pose: f32 },
    Opacity { index: usize, opacity: f32 },
    AttachOverlay { index: usize },
    DetachOverlay { index: usize },
}

/// A surface that records every call. Reference implementation for hosts
/// and the backend used by the integration tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted_indices(&self) -> Vec<usize> {
        let mut out = Vec::new();
        for ev in &self.events {
            match ev {
                SurfaceEvent::Mount { index, .. } => out.push(*index),
                SurfaceEvent::Unmount { index, .. } => out.retain(|i| i != index),
                _ => {}
            }
        }
        out
    }

    pub fn overlay_holder(&self) -> Option<usize> {
        let mut holder = None;
        for ev in &self.events {
            match ev {
                SurfaceEvent::AttachOverlay { index } => holder = Some(*index),
                SurfaceEvent::DetachOverlay { .. } => holder = None,
                _ => {}
            }
        }
        holder
    }
}

impl RenderSurface for RecordingSurface {
    fn mount(&mut self, index: usize, file: &str) {
        self.events.push(SurfaceEvent::Mount {
            index,
            file: file.to_string(),
        });
    }

    fn unmount(&mut self, index: usize, file: &str) {
        self.events.push(SurfaceEvent::Unmount {
            index,
            file: file.to_string(),
        });
    }

    fn set_world_yaw(&mut self, yaw: f32) {
        self.events.push(SurfaceEvent::WorldYaw(yaw));
    }

    fn apply_pose(&mut self, item: &ItemFrame) {
        self.events.push(SurfaceEvent::Pose {
            index: item.index,
            opacity_of_pose: item.opacity,
        });
    }

    fn apply_opacity(&mut self, index: usize, _file: &str, opacity: f32) {
        self.events.push(SurfaceEvent::Opacity { index, opacity });
    }

    fn attach_bounds_overlay(&mut self, index: usize, _file: &str) {
        self.events.push(SurfaceEvent::AttachOverlay { index });
    }

    fn detach_bounds_overlay(&mut self, index: usize, _file: &str) {
        self.events.push(SurfaceEvent::DetachOverlay { index });
    }
}
