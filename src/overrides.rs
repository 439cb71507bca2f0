use std::collections::BTreeMap;

use glam::Vec3;

/// Per-item pose adjustment, all fields optional. Radians for the angles,
/// uniform scalar for `scale`, world units for `offset`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoseOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vec3>,
}

impl PoseOverride {
    /// True when the override would not change a pose: no angles, no scale,
    /// and an offset that is absent or all zero.
    pub fn is_noop(&self) -> bool {
        self.yaw.is_none()
            && self.pitch.is_none()
            && self.roll.is_none()
            && self.scale.is_none()
            && self.offset.is_none_or(|o| o == Vec3::ZERO)
    }
}

/// A fully-populated override, ready for the pose target function. The
/// merge always produces one of these; downstream code never sees a
/// partial record.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedOverride {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub scale: f32,
    pub offset: Vec3,
}

impl Default for ResolvedOverride {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            scale: 1.0,
            offset: Vec3::ZERO,
        }
    }
}

fn finite(v: Option<f32>) -> Option<f32> {
    v.filter(|x| x.is_finite())
}

fn finite_positive(v: Option<f32>) -> Option<f32> {
    v.filter(|x| x.is_finite() && *x > 0.0)
}

fn finite_offset(v: Option<Vec3>) -> Option<Vec3> {
    v.filter(|o| o.x.is_finite() && o.y.is_finite() && o.z.is_finite())
}

/// Field-by-field merge: runtime wins if present, else compile-time, else
/// the baseline. Non-finite values count as absent; a non-positive scale
/// counts as absent. Inputs are not mutated.
pub fn merge(
    runtime: Option<&PoseOverride>,
    compiled: Option<&PoseOverride>,
    baseline: &ResolvedOverride,
) -> ResolvedOverride {
    let layered = |f: fn(&PoseOverride) -> Option<f32>, base: f32| {
        finite(runtime.and_then(f))
            .or_else(|| finite(compiled.and_then(f)))
            .unwrap_or(base)
    };

    ResolvedOverride {
        yaw: layered(|o| o.yaw, baseline.yaw),
        pitch: layered(|o| o.pitch, baseline.pitch),
        roll: layered(|o| o.roll, baseline.roll),
        scale: finite_positive(runtime.and_then(|o| o.scale))
            .or_else(|| finite_positive(compiled.and_then(|o| o.scale)))
            .unwrap_or(baseline.scale),
        offset: finite_offset(runtime.and_then(|o| o.offset))
            .or_else(|| finite_offset(compiled.and_then(|o| o.offset)))
            .unwrap_or(baseline.offset),
    }
}

/// Runtime override table: the authoring channel of the tuner. Every
/// mutation bumps the reset signal so the edit lands as an instantaneous
/// pose change instead of a smoothed drift.
#[derive(Debug, Default)]
pub struct OverrideTable {
    entries: BTreeMap<String, PoseOverride>,
    reset_version: u64,
}

impl OverrideTable {
    /// Merges the `Some` fields of `patch` over the stored entry for
    /// `file`, creating the entry if needed.
    pub fn set(&mut self, file: impl Into<String>, patch: PoseOverride) {
        let entry = self.entries.entry(file.into()).or_default();
        if patch.yaw.is_some() {
            entry.yaw = patch.yaw;
        }
        if patch.pitch.is_some() {
            entry.pitch = patch.pitch;
        }
        if patch.roll.is_some() {
            entry.roll = patch.roll;
        }
        if patch.scale.is_some() {
            entry.scale = patch.scale;
        }
        if patch.offset.is_some() {
            entry.offset = patch.offset;
        }
        self.reset_version += 1;
    }

    /// Replaces the whole entry for `file`.
    pub fn replace(&mut self, file: impl Into<String>, ov: PoseOverride) {
        self.entries.insert(file.into(), ov);
        self.reset_version += 1;
    }

    pub fn remove(&mut self, file: &str) {
        self.entries.remove(file);
        self.reset_version += 1;
    }

    pub fn get(&self, file: &str) -> Option<&PoseOverride> {
        self.entries.get(file)
    }

    /// Monotonically increasing counter; a change tells the animator to
    /// snap every mounted item back to its baseline pose.
    pub fn reset_version(&self) -> u64 {
        self.reset_version
    }

    /// The tuner's explicit "reset pose" control.
    pub fn bump_reset(&mut self) {
        self.reset_version += 1;
    }

    /// Serializable snapshot for export, omitting entries that would not
    /// change a pose.
    pub fn export(&self) -> BTreeMap<String, PoseOverride> {
        self.entries
            .iter()
            .filter(|(_, ov)| !ov.is_noop())
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

/// The two override layers the animator consults: a compile-time default
/// table and the runtime-authored table.
#[derive(Debug, Default)]
pub struct OverrideStack {
    pub compiled: BTreeMap<String, PoseOverride>,
    pub runtime: OverrideTable,
}

impl OverrideStack {
    pub fn resolve(&self, file: &str) -> ResolvedOverride {
        merge(
            self.runtime.get(file),
            self.compiled.get(file),
            &ResolvedOverride::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaw(v: f32) -> PoseOverride {
        PoseOverride {
            yaw: Some(v),
            ..PoseOverride::default()
        }
    }

    #[test]
    fn runtime_wins_then_compiled_then_baseline() {
        let base = ResolvedOverride::default();
        assert_eq!(merge(Some(&yaw(2.0)), Some(&yaw(1.0)), &base).yaw, 2.0);
        assert_eq!(merge(None, Some(&yaw(1.0)), &base).yaw, 1.0);
        assert_eq!(merge(None, None, &base).yaw, 0.0);
    }

    #[test]
    fn merge_is_per_field() {
        let run = PoseOverride {
            pitch: Some(0.3),
            ..PoseOverride::default()
        };
        let com = PoseOverride {
            yaw: Some(-1.0),
            scale: Some(2.0),
            ..PoseOverride::default()
        };
        let m = merge(Some(&run), Some(&com), &ResolvedOverride::default());
        assert_eq!(m.pitch, 0.3);
        assert_eq!(m.yaw, -1.0);
        assert_eq!(m.scale, 2.0);
        assert_eq!(m.roll, 0.0);
        assert_eq!(m.offset, Vec3::ZERO);
    }

    #[test]
    fn non_finite_values_fall_through() {
        let run = PoseOverride {
            yaw: Some(f32::NAN),
            offset: Some(Vec3::new(1.0, f32::INFINITY, 0.0)),
            ..PoseOverride::default()
        };
        let com = PoseOverride {
            yaw: Some(0.5),
            offset: Some(Vec3::new(0.0, 1.0, 0.0)),
            ..PoseOverride::default()
        };
        let m = merge(Some(&run), Some(&com), &ResolvedOverride::default());
        assert_eq!(m.yaw, 0.5);
        assert_eq!(m.offset, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn non_positive_scale_falls_through() {
        let run = PoseOverride {
            scale: Some(0.0),
            ..PoseOverride::default()
        };
        let m = merge(Some(&run), None, &ResolvedOverride::default());
        assert_eq!(m.scale, 1.0);
    }

    #[test]
    fn table_set_merges_patches_and_bumps_reset() {
        let mut table = OverrideTable::default();
        let v0 = table.reset_version();

        table.set("a.glb", yaw(1.0));
        table.set(
            "a.glb",
            PoseOverride {
                scale: Some(1.5),
                ..PoseOverride::default()
            },
        );

        let entry = table.get("a.glb").unwrap();
        assert_eq!(entry.yaw, Some(1.0));
        assert_eq!(entry.scale, Some(1.5));
        assert_eq!(table.reset_version(), v0 + 2);
    }

    #[test]
    fn export_omits_noop_entries() {
        let mut table = OverrideTable::default();
        table.set("kept.glb", yaw(0.2));
        table.replace("empty.glb", PoseOverride::default());
        table.replace(
            "zero_offset.glb",
            PoseOverride {
                offset: Some(Vec3::ZERO),
                ..PoseOverride::default()
            },
        );

        let out = table.export();
        assert!(out.contains_key("kept.glb"));
        assert!(!out.contains_key("empty.glb"));
        assert!(!out.contains_key("zero_offset.glb"));
    }

    #[test]
    fn stack_resolves_through_both_layers() {
        let mut stack = OverrideStack::default();
        stack.compiled.insert("a.glb".to_string(), yaw(1.0));
        assert_eq!(stack.resolve("a.glb").yaw, 1.0);

        stack.runtime.set("a.glb", yaw(2.0));
        assert_eq!(stack.resolve("a.glb").yaw, 2.0);
        assert_eq!(stack.resolve("missing.glb").scale, 1.0);
    }
}
