use crate::libs::format_float;
use std::path::Path;

pub const DEFAULT_RESOLUTION: u32 = 50000;
pub const DEFAULT_PENALTY: f64 = 0.1;
pub const DEFAULT_MIN_SIZE: u32 = 3;
pub const DEFAULT_MAX_SIZE: u32 = 200;
pub const DEFAULT_LOCAL_DIFF: f64 = 1.96;
pub const DEFAULT_LOCAL_WINDOW_SIZE: u32 = 5;

/// Parameters of one invocation. They drive both the OnTAD command line and
/// the output file name.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    pub resolution: u32,
    pub penalty: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub local_diff: f64,
    pub local_window_size: u32,
    pub output_path: Option<String>,
    pub compact_naming: bool,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            penalty: DEFAULT_PENALTY,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            local_diff: DEFAULT_LOCAL_DIFF,
            local_window_size: DEFAULT_LOCAL_WINDOW_SIZE,
            output_path: None,
            compact_naming: false,
        }
    }
}

impl RunParameters {
    /// `(key, value, is_default)` in file name order.
    fn tokens(&self) -> Vec<(&'static str, String, bool)> {
        vec![
            (
                "binsize",
                self.resolution.to_string(),
                self.resolution == DEFAULT_RESOLUTION,
            ),
            (
                "penalty",
                format_float(self.penalty),
                self.penalty == DEFAULT_PENALTY,
            ),
            (
                "minsz",
                self.min_size.to_string(),
                self.min_size == DEFAULT_MIN_SIZE,
            ),
            (
                "maxsz",
                self.max_size.to_string(),
                self.max_size == DEFAULT_MAX_SIZE,
            ),
            (
                "ldiff",
                format_float(self.local_diff),
                self.local_diff == DEFAULT_LOCAL_DIFF,
            ),
            (
                "lsize",
                self.local_window_size.to_string(),
                self.local_window_size == DEFAULT_LOCAL_WINDOW_SIZE,
            ),
        ]
    }
}

/// Drops the directories and the container suffix (`.mcool`, `.cool`, or
/// any single extension).
///
/// ```
/// use tad2bedpe::libs::naming::strip_container_suffix;
/// assert_eq!(strip_container_suffix("data/sample.mcool"), "sample");
/// assert_eq!(strip_container_suffix("sample.1000.cool"), "sample.1000");
/// assert_eq!(strip_container_suffix("sample"), "sample");
/// ```
pub fn strip_container_suffix(input: &str) -> String {
    let basename = Path::new(input)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| input.to_string());

    for suffix in [".mcool", ".cool"] {
        if let Some(stem) = basename.strip_suffix(suffix) {
            if !stem.is_empty() {
                return stem.to_string();
            }
        }
    }

    match basename.rfind('.') {
        Some(pos) if pos > 0 => basename[..pos].to_string(),
        _ => basename,
    }
}

/// Name of the BEDPE file for a run on `input`.
///
/// An explicit output path wins. Otherwise every parameter adds a
/// `.<key>_<value>` token, except default values under compact naming.
///
/// ```
/// use tad2bedpe::libs::naming::{name, RunParameters};
/// let mut params = RunParameters::default();
/// params.compact_naming = true;
/// params.penalty = 0.2;
/// assert_eq!(name(&params, "sample.mcool"), "sample.penalty_0.2.bedpe");
/// ```
pub fn name(params: &RunParameters, input: &str) -> String {
    if let Some(output) = &params.output_path {
        return output.clone();
    }

    let mut name = strip_container_suffix(input);
    for (key, value, is_default) in params.tokens() {
        if params.compact_naming && is_default {
            continue;
        }
        name.push_str(&format!(".{}_{}", key, value));
    }
    name.push_str(".bedpe");

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_defaults() {
        let params = RunParameters {
            compact_naming: true,
            ..Default::default()
        };
        assert_eq!(name(&params, "sample.mcool"), "sample.bedpe");
    }

    #[test]
    fn full_defaults() {
        let params = RunParameters::default();
        assert_eq!(
            name(&params, "sample.mcool"),
            "sample.binsize_50000.penalty_0.1.minsz_3.maxsz_200.ldiff_1.96.lsize_5.bedpe"
        );
    }

    #[test]
    fn compact_keeps_changed_values_in_order() {
        let params = RunParameters {
            resolution: 10000,
            local_diff: 2.0,
            local_window_size: 7,
            compact_naming: true,
            ..Default::default()
        };
        assert_eq!(
            name(&params, "/data/hic/sample.mcool"),
            "sample.binsize_10000.ldiff_2.0.lsize_7.bedpe"
        );
    }

    #[test]
    fn explicit_output_wins() {
        let params = RunParameters {
            resolution: 10000,
            output_path: Some("out/tads.bedpe".to_string()),
            ..Default::default()
        };
        assert_eq!(name(&params, "sample.mcool"), "out/tads.bedpe");
    }

    #[test]
    fn strip_suffixes() {
        assert_eq!(strip_container_suffix("a.b.mcool"), "a.b");
        assert_eq!(strip_container_suffix("x/y/a.cool"), "a");
        assert_eq!(strip_container_suffix("a.h5"), "a");
        assert_eq!(strip_container_suffix(".hidden"), ".hidden");
    }
}
