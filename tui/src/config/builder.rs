use regression_core::dataset::{MAX_POINTS, MIN_POINTS};
use regression_core::geometry::clamp_to_domain;
use regression_core::SessionConfig;

use super::model::{AppConfig, CellSize, ConfigDraft, DescentConfig};

/// The longest gradient descent run the animation accepts.
pub const MAX_ITERATIONS: u64 = 100_000;

/// Converts a [`ConfigDraft`] into validated [`AppConfig`].
///
/// # Errors
/// Returns a human-readable error if any value is invalid.
pub fn build(d: &ConfigDraft) -> Result<AppConfig, String> {
    let positive = |v: f64, name: &str| {
        if v.is_finite() && v > 0.0 {
            Ok(v)
        } else {
            Err(format!("{name} must be a positive number"))
        }
    };

    let point_count = usize::try_from(d.point_count)
        .ok()
        .filter(|n| (MIN_POINTS..=MAX_POINTS).contains(n))
        .ok_or_else(|| {
            format!("point_count must be between {MIN_POINTS} and {MAX_POINTS}, got {}", d.point_count)
        })?;

    if !(1..=MAX_ITERATIONS).contains(&d.iterations) {
        return Err(format!(
            "iterations must be between 1 and {MAX_ITERATIONS}, got {}",
            d.iterations
        ));
    }

    Ok(AppConfig {
        session: SessionConfig {
            point_count,
            initial: d.initial.params(),
            prediction_x: clamp_to_domain(d.prediction_x),
            theme: d.theme,
            seed: d.seed,
        },
        descent: DescentConfig {
            learning_rate: positive(d.learning_rate, "learning_rate")?,
            iterations: d.iterations as usize,
        },
        cell: CellSize {
            width_px: positive(d.cell_width_px, "cell_width_px")?,
            height_px: positive(d.cell_height_px, "cell_height_px")?,
        },
        device_pixel_ratio: positive(d.device_pixel_ratio, "device_pixel_ratio")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::InitialKind;
    use regression_core::LineParameters;

    #[test]
    fn defaults_are_valid() {
        let config = build(&ConfigDraft::default()).unwrap();

        assert_eq!(config.session.point_count, 20);
        assert_eq!(config.session.initial, LineParameters::ZERO);
        assert_eq!(config.descent.iterations, 300);
        assert_eq!(config.cell, CellSize { width_px: 8., height_px: 16. });
    }

    #[test]
    fn point_count_bounds() {
        for (count, ok) in [(1, false), (2, true), (100, true), (101, false)] {
            let draft = ConfigDraft {
                point_count: count,
                ..ConfigDraft::default()
            };
            assert_eq!(build(&draft).is_ok(), ok, "point_count {count}");
        }
    }

    #[test]
    fn iterations_bounds() {
        let cases = [
            (1, true),
            (MAX_ITERATIONS, true),
            (MAX_ITERATIONS + 1, false),
            (10_000_000_000, false),
        ];

        for (iterations, ok) in cases {
            let draft = ConfigDraft {
                iterations,
                ..ConfigDraft::default()
            };
            assert_eq!(build(&draft).is_ok(), ok, "iterations {iterations}");
        }
    }

    #[test]
    fn prediction_x_is_clamped() {
        let draft = ConfigDraft {
            prediction_x: 42.,
            initial: InitialKind::Alternate,
            ..ConfigDraft::default()
        };
        let config = build(&draft).unwrap();

        assert_eq!(config.session.prediction_x, 10.);
        assert_eq!(config.session.initial, LineParameters::ALTERNATE);
    }

    #[test]
    fn rejects_non_positive_values() {
        let drafts = [
            ConfigDraft { learning_rate: 0., ..ConfigDraft::default() },
            ConfigDraft { iterations: 0, ..ConfigDraft::default() },
            ConfigDraft { cell_width_px: -1., ..ConfigDraft::default() },
            ConfigDraft { cell_height_px: f64::NAN, ..ConfigDraft::default() },
            ConfigDraft { device_pixel_ratio: 0., ..ConfigDraft::default() },
        ];

        for draft in drafts {
            assert!(build(&draft).is_err(), "{draft:?}");
        }
    }
}
