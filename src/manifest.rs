use std::path::Path;

use crate::error::{VitrineError, VitrineResult};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One model in the gallery sequence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Item {
    /// File name only, e.g. `2_7_2025-2.glb`. Doubles as the stable id.
    pub file: String,
    /// Display label, e.g. `Feb 7, 2025 (v2)`.
    pub label: String,
    /// `YYYY-MM-DD` when the file name parses as a date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Variant tag, e.g. `v2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl Item {
    /// Builds an item from a bare file name, deriving label/date/variant
    /// from the `M_D_YYYY[-N]` stem convention. Names that do not follow
    /// the convention keep the stem as their label.
    pub fn from_file_name(file: impl Into<String>) -> Self {
        let file = file.into();
        let stem = match file.rsplit_once('.') {
            Some((stem, ext)) if ext.eq_ignore_ascii_case("glb") => stem,
            _ => file.as_str(),
        };

        match parse_stem(stem) {
            Some(parsed) => Self {
                file: file.clone(),
                label: parsed.label,
                date: Some(parsed.date),
                variant: parsed.variant,
            },
            None => Self {
                label: stem.to_string(),
                file,
                date: None,
                variant: None,
            },
        }
    }
}

struct ParsedStem {
    label: String,
    date: String,
    variant: Option<String>,
}

fn parse_stem(stem: &str) -> Option<ParsedStem> {
    let (date_part, variant_num) = match stem.split_once('-') {
        Some((d, v)) => (d, Some(v.parse::<u32>().ok()?)),
        None => (stem, None),
    };

    let mut parts = date_part.split('_');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year < 1000 {
        return None;
    }

    let month_name = MONTH_NAMES[(month - 1) as usize];
    let variant = variant_num.map(|n| format!("v{n}"));
    let label = match &variant {
        Some(v) => format!("{month_name} {day}, {year} ({v})"),
        None => format!("{month_name} {day}, {year}"),
    };
    let date = format!("{year:04}-{month:02}-{day:02}");

    Some(ParsedStem {
        label,
        date,
        variant,
    })
}

/// The fixed, ordered item list. Built once at startup; never mutated.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Manifest {
    pub items: Vec<Item>,
}

impl Manifest {
    /// Builds a manifest from file names, sorted by file name (the stable
    /// sequence key).
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<Item> = files
            .into_iter()
            .map(|f| Item::from_file_name(f.into()))
            .collect();
        items.sort_by(|a, b| a.file.cmp(&b.file));
        Self { items }
    }

    /// Scans `dir` for `.glb` files (non-recursive).
    pub fn from_dir(dir: impl AsRef<Path>) -> VitrineResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            VitrineError::manifest(format!("read dir '{}': {e}", dir.display()))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| VitrineError::manifest(format!("read dir entry: {e}")))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.to_ascii_lowercase().ends_with(".glb") {
                files.push(name.to_string());
            }
        }

        Ok(Self::from_files(files))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Lookup with the index clamped into the list, so section indices past
    /// the end resolve to the last item. `None` only when the list is empty.
    pub fn get_clamped(&self, index: usize) -> Option<&Item> {
        if self.items.is_empty() {
            return None;
        }
        Some(&self.items[index.min(self.items.len() - 1)])
    }
}
