use std::collections::BTreeMap;

use crate::{
    animator::{Animator, Frame},
    surface::RenderSurface,
    window::Role,
};

/// Drives a [`RenderSurface`] from the animator: one `tick` per host frame.
/// Owns the mount/unmount bookkeeping and the bounding-box overlay, which
/// is scoped to the current item while debug bounds are enabled and
/// released when that item stops being current, when the flag is turned
/// off, or when the session drops.
pub struct GallerySession<S: RenderSurface> {
    animator: Animator,
    surface: S,
    mounted: BTreeMap<usize, String>,
    overlay: Option<(usize, String)>,
    debug_bounds: bool,
}

impl<S: RenderSurface> GallerySession<S> {
    pub fn new(animator: Animator, surface: S) -> Self {
        Self {
            animator,
            surface,
            mounted: BTreeMap::new(),
            overlay: None,
            debug_bounds: false,
        }
    }

    #[must_use]
    pub fn with_debug_bounds(mut self, enabled: bool) -> Self {
        self.debug_bounds = enabled;
        self
    }

    /// The authoring channel and scroll state live on the animator.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn set_debug_bounds(&mut self, enabled: bool) {
        self.debug_bounds = enabled;
        if !enabled
            && let Some((index, file)) = self.overlay.take()
        {
            self.surface.detach_bounds_overlay(index, &file);
        }
    }

    /// Advances one frame and pushes the result to the surface: unmounts,
    /// mounts, the world-rig yaw, then per-item pose and opacity.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, progress: f32, dt: f32) -> Frame {
        let frame = self.animator.advance(progress, dt);

        let now: BTreeMap<usize, String> = frame
            .items
            .iter()
            .map(|i| (i.index, i.file.clone()))
            .collect();

        let desired_overlay = if self.debug_bounds {
            frame
                .items
                .iter()
                .find(|i| i.role == Role::Current)
                .map(|i| (i.index, i.file.clone()))
        } else {
            None
        };

        // Release the overlay first so a departing holder is detached
        // before its unmount.
        if self.overlay.is_some() && self.overlay != desired_overlay {
            let (index, file) = self.overlay.take().unwrap();
            self.surface.detach_bounds_overlay(index, &file);
        }

        let left: Vec<(usize, String)> = self
            .mounted
            .iter()
            .filter(|(index, _)| !now.contains_key(index))
            .map(|(i, f)| (*i, f.clone()))
            .collect();
        for (index, file) in left {
            self.surface.unmount(index, &file);
        }

        for item in &frame.items {
            if !self.mounted.contains_key(&item.index) {
                self.surface.mount(item.index, &item.file);
            }
        }

        self.surface.set_world_yaw(frame.world_yaw);
        for item in &frame.items {
            self.surface.apply_pose(item);
            self.surface.apply_opacity(item.index, &item.file, item.opacity);
        }

        if self.overlay.is_none()
            && let Some((index, file)) = desired_overlay
        {
            self.surface.attach_bounds_overlay(index, &file);
            self.overlay = Some((index, file));
        }

        self.mounted = now;
        frame
    }
}

impl<S: RenderSurface> Drop for GallerySession<S> {
    fn drop(&mut self) {
        if let Some((index, file)) = self.overlay.take() {
            self.surface.detach_bounds_overlay(index, &file);
        }
        for (index, file) in std::mem::take(&mut self.mounted) {
            self.surface.unmount(index, &file);
        }
    }
}
