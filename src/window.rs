/// What a visible item is doing this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Actively departing toward the hand-off slot.
    Current,
    /// Actively arriving from the hand-off slot.
    Next,
    /// Dormant, receding behind the active section.
    Past,
}

pub fn role_of(index: usize, active_index: usize) -> Role {
    if index == active_index {
        Role::Current
    } else if index == active_index + 1 {
        Role::Next
    } else {
        Role::Past
    }
}

/// The exact set of section indices animated this frame: the active section,
/// its successor (clamped to the last section), and up to two predecessors.
/// Deduplicated, at most four entries, independent of the total section
/// count. Sections outside this window are not mounted at all.
pub fn visible_window(active_index: usize, sections: usize) -> Vec<usize> {
    let sections = sections.max(1);
    let active = active_index.min(sections - 1);

    let mut out = Vec::with_capacity(4);
    out.push(active);

    let next = (active + 1).min(sections - 1);
    if !out.contains(&next) {
        out.push(next);
    }

    for k in (active.saturating_sub(2)..active).rev() {
        if !out.contains(&k) {
            out.push(k);
        }
    }

    out
}
