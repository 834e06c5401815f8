//! Human-readable wording for the raw numbers the core returns.
use tides_core::FloodedMask;

/// "3.50 meters above the water" / "2.00 meters below the water".
pub fn describe_height_above_water(diff: f64) -> String {
    if diff == 0.0 {
        "level with the water".to_string()
    } else {
        let side = if diff > 0.0 { "above" } else { "below" };
        format!("{:.2} meters {side} the water", diff.abs())
    }
}

/// Wording for a visible-land change; positive deltas are losses.
pub fn describe_land_delta(delta: i64) -> String {
    match delta {
        0 => "no change in visible land".to_string(),
        d if d > 0 => format!("will lose {} {}", d, cells(d.unsigned_abs())),
        d => format!("will gain {} {}", d.unsigned_abs(), cells(d.unsigned_abs())),
    }
}

fn cells(n: u64) -> &'static str {
    if n == 1 { "cell" } else { "cells" }
}

/// One text line per grid row: `~` for water, `#` for land.
pub fn render_mask(mask: &FloodedMask) -> String {
    let mut out = String::with_capacity(mask.rows() * (mask.cols() + 1));
    for r in 0..mask.rows() {
        for c in 0..mask.cols() {
            out.push(if mask.get(r, c) { '~' } else { '#' });
        }
        out.push('\n');
    }
    out
}
