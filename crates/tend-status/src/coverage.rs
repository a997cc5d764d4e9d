//! Enforced coverage threshold read from a manifest's test runner config.

use serde_json::Value;
use tend_core::sources::PackageManifest;

const THRESHOLDS: [&str; 4] = ["statements", "branches", "functions", "lines"];

/// The minimum coverage percentage the manifest enforces.
///
/// A `tap` section wins over `c8`. `tap` enforces 100 unless
/// `check-coverage` is false or explicit thresholds are set; `c8` enforces
/// nothing unless `check-coverage` is true.
#[must_use]
pub fn coverage(manifest: &PackageManifest) -> Option<u32> {
    if let Some(tap) = manifest.tap.as_ref() {
        if tap.get("check-coverage").and_then(Value::as_bool) == Some(false) {
            return Some(0);
        }
        return Some(min_threshold(tap).unwrap_or(100));
    }

    let c8 = manifest.c8.as_ref()?;
    if c8.get("check-coverage").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    if c8.get("100").and_then(Value::as_bool) == Some(true) {
        return Some(100);
    }
    Some(min_threshold(c8).unwrap_or(0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn min_threshold(section: &Value) -> Option<u32> {
    THRESHOLDS
        .iter()
        .filter_map(|key| section.get(*key)?.as_f64())
        .map(|pct| pct.clamp(0.0, 100.0) as u32)
        .min()
}
