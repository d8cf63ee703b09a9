//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never fail a load.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `RunConfig`.
///
/// Any new field added to `RunConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [input]
        "input",
        "input.folder",
        "input.extension",
        "input.output_dir",
        "input.suffix",
        // [window]
        "window",
        "window.ft_above",
        "window.ft_below",
        // [volumetrics]
        "volumetrics",
        "volumetrics.area_acres",
        "volumetrics.bo",
        // [curves]
        "curves",
        "curves.phi",
        "curves.sw",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed `RunConfig`.
///
/// Returns (errors, warnings). Errors are impossible values that must stop the
/// run; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::RunConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Bo < 1 would mean oil shrinks when brought to reservoir conditions
    let bo = config.volumetrics.bo;
    if bo.is_finite() && bo > 0.0 && bo < 1.0 {
        errors.push(format!(
            "volumetrics.bo = {bo:.3} is below 1.0 (reservoir oil cannot be smaller than stock-tank oil)"
        ));
    }
    if bo > 3.0 {
        warnings.push(ValidationWarning {
            field: "volumetrics.bo".to_string(),
            message: format!("volumetrics.bo = {bo:.3} is outside typical range (1.0-3.0 rb/stb)"),
            suggestion: None,
        });
    }

    let w = &config.window;
    for (name, value) in [("window.ft_above", w.ft_above), ("window.ft_below", w.ft_below)] {
        if value > 1000.0 {
            warnings.push(ValidationWarning {
                field: name.to_string(),
                message: format!("{name} = {value:.1} ft is unusually large (> 1000 ft)"),
                suggestion: None,
            });
        }
    }

    let area = config.volumetrics.area_acres;
    if area > 5000.0 {
        warnings.push(ValidationWarning {
            field: "volumetrics.area_acres".to_string(),
            message: format!(
                "volumetrics.area_acres = {area:.1} is outside typical drainage range (< 5000 acres)"
            ),
            suggestion: None,
        });
    }

    if config.curves.phi == config.curves.sw {
        warnings.push(ValidationWarning {
            field: "curves.sw".to_string(),
            message: format!(
                "curves.phi and curves.sw both name '{}'; SoPhiH will be phi * (1 - phi)",
                config.curves.phi
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
