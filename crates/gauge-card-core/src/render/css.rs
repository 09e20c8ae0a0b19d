//! CSS gradient strings.

use crate::segments::GradientStop;

fn fmt_deg(deg: f64) -> String {
    let rounded = (deg * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}deg", rounded as i64)
    } else {
        format!("{rounded}deg")
    }
}

/// Build a `conic-gradient()` for an arc starting at `start_deg` and
/// sweeping `sweep_deg` clockwise.
///
/// Stop angles are relative to the `from` angle. Stops without a color are
/// skipped; an empty list yields `None`.
pub fn conic_gradient(stops: &[GradientStop], start_deg: f64, sweep_deg: f64) -> Option<String> {
    let parts: Vec<String> = stops
        .iter()
        .filter_map(|stop| {
            let color = stop.color.as_deref()?;
            Some(format!("{} {}", color, fmt_deg(stop.pos.clamp(0.0, 1.0) * sweep_deg)))
        })
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(format!(
        "conic-gradient(from {}, {})",
        fmt_deg(start_deg),
        parts.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_circle_gradient() {
        let stops = vec![
            GradientStop::new(0.0, "#00ff00"),
            GradientStop::new(0.4, "#ffff00"),
            GradientStop {
                pos: 0.6,
                color: None,
            },
            GradientStop::new(0.8, "#ff0000"),
        ];
        assert_eq!(
            conic_gradient(&stops, -90.0, 180.0).as_deref(),
            Some("conic-gradient(from -90deg, #00ff00 0deg, #ffff00 72deg, #ff0000 144deg)")
        );
    }

    #[test]
    fn test_empty_gradient() {
        assert_eq!(conic_gradient(&[], 0.0, 180.0), None);
    }
}
