use std::f32::consts::PI;

use glam::Vec3;

use crate::{overrides::ResolvedOverride, window::Role};

/// Baseline yaw that turns a model's front toward the camera.
pub const FRONT_YAW: f32 = PI;
/// Fixed downward tilt applied to every item.
pub const BASE_PITCH: f32 = 0.15;

/// Opacity/scale of an item parked in the hand-off slot.
const FADED_OPACITY: f32 = 0.08;
const FADED_SCALE: f32 = 0.98;
/// Base opacity of a past item at distance 1; divided by the distance.
const PAST_OPACITY: f32 = 0.03;
/// Past items sit a quarter step beyond their distance slot.
const PAST_Z_BIAS: f32 = 0.25;

/// Where a single item wants to be this frame. The damper chases these
/// values; nothing here is time-dependent beyond `local_t`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PoseTarget {
    pub position: Vec3,
    /// Euler XYZ (pitch, yaw, roll), radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Pure target function of role, section-local progress, distance behind
/// the active section, depth step and the item's resolved override.
///
/// `current` departs toward the hand-off slot as `local_t` sweeps 0→1;
/// `next` runs the exact mirror arriving from it; `past` holds a static
/// pose that recedes and fades with distance.
pub fn pose_target(
    role: Role,
    local_t: f32,
    distance: usize,
    far_z_step: f32,
    ov: &ResolvedOverride,
) -> PoseTarget {
    let t = if local_t.is_finite() {
        local_t.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let (z, handoff_yaw, opacity, role_scale) = match role {
        Role::Current => (
            lerp(0.0, far_z_step, t),
            lerp(0.0, PI, t),
            lerp(1.0, FADED_OPACITY, t),
            lerp(1.0, FADED_SCALE, t),
        ),
        Role::Next => (
            lerp(far_z_step, 0.0, t),
            lerp(PI, 0.0, t),
            lerp(FADED_OPACITY, 1.0, t),
            lerp(FADED_SCALE, 1.0, t),
        ),
        Role::Past => {
            let d = distance.max(1) as f32;
            (
                far_z_step * (d + PAST_Z_BIAS),
                PI,
                PAST_OPACITY / d,
                FADED_SCALE,
            )
        }
    };

    PoseTarget {
        position: ov.offset + Vec3::new(0.0, 0.0, z),
        rotation: Vec3::new(
            BASE_PITCH + ov.pitch,
            FRONT_YAW + ov.yaw + handoff_yaw,
            ov.roll,
        ),
        scale: ov.scale * role_scale,
        opacity,
    }
}

/// The pose an item snaps to on mount or on a reset signal: front slot,
/// no hand-off yaw, fully opaque.
pub fn baseline_pose(ov: &ResolvedOverride) -> PoseTarget {
    PoseTarget {
        position: Vec3::ZERO,
        rotation: Vec3::new(BASE_PITCH + ov.pitch, FRONT_YAW + ov.yaw, ov.roll),
        scale: ov.scale,
        opacity: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR_Z: f32 = -8.0;

    fn base() -> ResolvedOverride {
        ResolvedOverride::default()
    }

    #[test]
    fn current_endpoints() {
        let at0 = pose_target(Role::Current, 0.0, 0, FAR_Z, &base());
        assert_eq!(at0.position.z, 0.0);
        assert_eq!(at0.opacity, 1.0);
        assert_eq!(at0.scale, 1.0);
        assert_eq!(at0.rotation.y, FRONT_YAW);

        let at1 = pose_target(Role::Current, 1.0, 0, FAR_Z, &base());
        assert_eq!(at1.position.z, FAR_Z);
        assert!((at1.opacity - FADED_OPACITY).abs() < 1e-6);
        assert!((at1.scale - FADED_SCALE).abs() < 1e-6);
        assert_eq!(at1.rotation.y, FRONT_YAW + PI);
    }

    #[test]
    fn next_mirrors_current_exactly() {
        for t in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            let cur = pose_target(Role::Current, t, 0, FAR_Z, &base());
            let nxt = pose_target(Role::Next, 1.0 - t, 0, FAR_Z, &base());
            assert!((cur.position.z - nxt.position.z).abs() < 1e-5);
            assert!((cur.opacity - nxt.opacity).abs() < 1e-6);
            assert!((cur.scale - nxt.scale).abs() < 1e-6);
        }
    }

    #[test]
    fn crossfade_swaps_at_the_boundaries() {
        let cur0 = pose_target(Role::Current, 0.0, 0, FAR_Z, &base());
        let nxt0 = pose_target(Role::Next, 0.0, 0, FAR_Z, &base());
        assert_eq!(cur0.opacity, 1.0);
        assert_eq!(nxt0.opacity, FADED_OPACITY);

        let cur1 = pose_target(Role::Current, 1.0, 0, FAR_Z, &base());
        let nxt1 = pose_target(Role::Next, 1.0, 0, FAR_Z, &base());
        assert!((cur1.opacity - FADED_OPACITY).abs() < 1e-6);
        assert!((nxt1.opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn past_pose_recedes_and_fades_with_distance() {
        let d1 = pose_target(Role::Past, 0.4, 1, FAR_Z, &base());
        assert_eq!(d1.position.z, FAR_Z * 1.25);
        assert_eq!(d1.opacity, 0.03);
        assert_eq!(d1.scale, FADED_SCALE);
        assert_eq!(d1.rotation.y, FRONT_YAW + PI);

        let d3 = pose_target(Role::Past, 0.4, 3, FAR_Z, &base());
        assert_eq!(d3.position.z, FAR_Z * 3.25);
        assert!((d3.opacity - 0.01).abs() < 1e-6);

        // Distance floors at one even if a caller passes zero.
        let d0 = pose_target(Role::Past, 0.4, 0, FAR_Z, &base());
        assert_eq!(d0.position.z, FAR_Z * 1.25);
    }

    #[test]
    fn override_composes_into_the_target() {
        let ov = ResolvedOverride {
            yaw: 0.5,
            pitch: -0.1,
            roll: 0.2,
            scale: 2.0,
            offset: Vec3::new(1.0, 2.0, 3.0),
        };
        let p = pose_target(Role::Current, 0.0, 0, FAR_Z, &ov);
        assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((p.rotation.x - (BASE_PITCH - 0.1)).abs() < 1e-6);
        assert!((p.rotation.y - (FRONT_YAW + 0.5)).abs() < 1e-6);
        assert_eq!(p.rotation.z, 0.2);
        assert_eq!(p.scale, 2.0);

        let mid = pose_target(Role::Current, 0.5, 0, FAR_Z, &ov);
        assert_eq!(mid.position.z, 3.0 + FAR_Z * 0.5);
    }

    #[test]
    fn local_t_is_clamped_and_defaulted() {
        let over = pose_target(Role::Current, 3.0, 0, FAR_Z, &base());
        assert!((over.opacity - FADED_OPACITY).abs() < 1e-6);
        let nan = pose_target(Role::Current, f32::NAN, 0, FAR_Z, &base());
        assert_eq!(nan.opacity, 1.0);
    }

    #[test]
    fn baseline_is_front_slot_fully_opaque() {
        let b = baseline_pose(&base());
        assert_eq!(b.position, Vec3::ZERO);
        assert_eq!(b.opacity, 1.0);
        assert_eq!(b.scale, 1.0);
        assert_eq!(b.rotation.y, FRONT_YAW);
    }
}
