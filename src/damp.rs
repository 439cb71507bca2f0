use glam::Vec3;

use crate::pose::PoseTarget;

/// Damping constant for position, rotation and scale channels.
pub const POSE_LAMBDA: f32 = 8.0;
/// Damping constant for opacity; a little snappier than the pose.
pub const OPACITY_LAMBDA: f32 = 10.0;

/// Frame-rate-independent exponential decay toward `target`. Pure decay:
/// never overshoots, and leaves `current` untouched when it already equals
/// the target. Non-positive (or non-finite) `dt` is a no-op.
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    if !(dt > 0.0) {
        return current;
    }
    target + (current - target) * (-lambda * dt).exp()
}

pub fn damp_vec3(current: Vec3, target: Vec3, lambda: f32, dt: f32) -> Vec3 {
    Vec3::new(
        damp(current.x, target.x, lambda, dt),
        damp(current.y, target.y, lambda, dt),
        damp(current.z, target.z, lambda, dt),
    )
}

/// The independently smoothed channels of one item. Each channel chases its
/// own target; there is no coupling and no velocity state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DampedPose {
    pub position: Vec3,
    /// Euler XYZ (pitch, yaw, roll), radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

impl DampedPose {
    /// Starts (or restarts) every channel exactly at `pose`, bypassing the
    /// damper. Used on mount and on a reset signal.
    pub fn snapped_to(pose: &PoseTarget) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
            scale: pose.scale,
            opacity: pose.opacity,
        }
    }

    /// Advances every channel toward `target` by `dt` seconds.
    pub fn step_toward(&mut self, target: &PoseTarget, dt: f32) {
        self.position = damp_vec3(self.position, target.position, POSE_LAMBDA, dt);
        self.rotation = damp_vec3(self.rotation, target.rotation, POSE_LAMBDA, dt);
        self.scale = damp(self.scale, target.scale, POSE_LAMBDA, dt);
        self.opacity = damp(self.opacity, target.opacity, OPACITY_LAMBDA, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_is_idempotent_at_the_target() {
        for dt in [0.0f32, 0.008, 0.016, 1.0, 100.0] {
            assert_eq!(damp(3.5, 3.5, POSE_LAMBDA, dt), 3.5);
        }
    }

    #[test]
    fn zero_dt_changes_nothing() {
        assert_eq!(damp(1.0, 5.0, POSE_LAMBDA, 0.0), 1.0);
        assert_eq!(damp(1.0, 5.0, POSE_LAMBDA, -0.5), 1.0);
    }

    #[test]
    fn damping_converges_without_overshoot() {
        let mut v = 0.0f32;
        let mut last_gap = 5.0f32;
        for _ in 0..200 {
            v = damp(v, 5.0, POSE_LAMBDA, 0.016);
            let gap = 5.0 - v;
            assert!(gap >= 0.0, "overshot: v={v}");
            assert!(gap <= last_gap);
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
    }

    #[test]
    fn damping_composes_over_split_timesteps() {
        // exp decay: one step of dt equals two steps of dt/2.
        let whole = damp(1.0, 9.0, POSE_LAMBDA, 0.032);
        let halves = damp(damp(1.0, 9.0, POSE_LAMBDA, 0.016), 9.0, POSE_LAMBDA, 0.016);
        assert!((whole - halves).abs() < 1e-4);
    }

    #[test]
    fn pose_steps_all_channels_independently() {
        let target = PoseTarget {
            position: Vec3::new(1.0, 0.0, -4.0),
            rotation: Vec3::new(0.15, 3.0, 0.0),
            scale: 0.98,
            opacity: 0.08,
        };
        let mut pose = DampedPose {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            opacity: 1.0,
        };
        pose.step_toward(&target, 0.016);

        assert!(pose.position.x > 0.0 && pose.position.x < 1.0);
        assert!(pose.position.z < 0.0 && pose.position.z > -4.0);
        assert!(pose.opacity < 1.0 && pose.opacity > 0.08);

        // Opacity uses a faster lambda than the pose channels.
        let pose_frac = pose.position.x / 1.0;
        let opacity_frac = (1.0 - pose.opacity) / (1.0 - 0.08);
        assert!(opacity_frac > pose_frac);
    }

    #[test]
    fn snap_lands_exactly_on_the_pose() {
        let target = PoseTarget {
            position: Vec3::new(0.0, 2.0, -8.0),
            rotation: Vec3::new(0.15, 3.14, 0.1),
            scale: 0.5,
            opacity: 0.3,
        };
        let pose = DampedPose::snapped_to(&target);
        assert_eq!(pose.position, target.position);
        assert_eq!(pose.opacity, target.opacity);
    }
}
