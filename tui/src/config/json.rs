use regression_core::Theme;

use super::model::{ConfigDraft, InitialKind};

/// Loads a [`ConfigDraft`] from a JSON file.
///
/// # Errors
/// Returns a human-readable string if the file cannot be read or parsed.
pub fn load(path: &str) -> Result<ConfigDraft, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;

    parse(&content)
}

/// Parses a [`ConfigDraft`] from JSON text, every missing key takes its default.
///
/// # Errors
/// Returns a human-readable string if the text is not a JSON object or a key has the wrong type.
pub fn parse(content: &str) -> Result<ConfigDraft, String> {
    let val: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

    if !val.is_object() {
        return Err("config must be a JSON object".into());
    }

    let defaults = ConfigDraft::default();

    let u64_or = |key: &str, default: u64| -> Result<u64, String> {
        match &val[key] {
            serde_json::Value::Null => Ok(default),
            v => v
                .as_u64()
                .ok_or_else(|| format!("{key} must be a non-negative integer")),
        }
    };

    let f64_or = |key: &str, default: f64| -> Result<f64, String> {
        match &val[key] {
            serde_json::Value::Null => Ok(default),
            v => v.as_f64().ok_or_else(|| format!("{key} must be a number")),
        }
    };

    let theme = match val["theme"].as_str() {
        None if val["theme"].is_null() => defaults.theme,
        None => return Err("theme must be a string".into()),
        Some(s) => s.parse::<Theme>()?,
    };

    let initial = match val["initial_params"].as_str() {
        None if val["initial_params"].is_null() => defaults.initial,
        None => return Err("initial_params must be a string".into()),
        Some("zero") => InitialKind::Zero,
        Some("alternate") => InitialKind::Alternate,
        Some(other) => return Err(format!("unknown initial_params: {other}")),
    };

    let seed = match &val["seed"] {
        serde_json::Value::Null => None,
        v => Some(v.as_u64().ok_or("seed must be a non-negative integer")?),
    };

    Ok(ConfigDraft {
        point_count: u64_or("point_count", defaults.point_count)?,
        theme,
        initial,
        prediction_x: f64_or("prediction_x", defaults.prediction_x)?,
        seed,
        learning_rate: f64_or("learning_rate", defaults.learning_rate)?,
        iterations: u64_or("iterations", defaults.iterations)?,
        cell_width_px: f64_or("cell_width_px", defaults.cell_width_px)?,
        cell_height_px: f64_or("cell_height_px", defaults.cell_height_px)?,
        device_pixel_ratio: f64_or("device_pixel_ratio", defaults.device_pixel_ratio)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(parse("{}").unwrap(), ConfigDraft::default());
    }

    #[test]
    fn reads_every_key() {
        let draft = parse(
            r#"{
                "point_count": 50,
                "theme": "dark",
                "initial_params": "alternate",
                "prediction_x": -3.5,
                "seed": 11,
                "learning_rate": 0.02,
                "iterations": 120,
                "cell_width_px": 10,
                "cell_height_px": 20,
                "device_pixel_ratio": 2
            }"#,
        )
        .unwrap();

        assert_eq!(draft.point_count, 50);
        assert_eq!(draft.theme, Theme::Dark);
        assert_eq!(draft.initial, InitialKind::Alternate);
        assert_eq!(draft.prediction_x, -3.5);
        assert_eq!(draft.seed, Some(11));
        assert_eq!(draft.learning_rate, 0.02);
        assert_eq!(draft.iterations, 120);
        assert_eq!(draft.cell_width_px, 10.);
        assert_eq!(draft.cell_height_px, 20.);
        assert_eq!(draft.device_pixel_ratio, 2.);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse("[1, 2]").is_err());
        assert!(parse("not json").is_err());
        assert!(parse(r#"{"theme": "sepia"}"#).is_err());
        assert!(parse(r#"{"theme": 3}"#).is_err());
        assert!(parse(r#"{"initial_params": "random"}"#).is_err());
        assert!(parse(r#"{"initial_params": 5}"#).is_err());
        assert!(parse(r#"{"point_count": -4}"#).is_err());
        assert!(parse(r#"{"learning_rate": "fast"}"#).is_err());
        assert!(parse(r#"{"seed": 1.5}"#).is_err());
    }

    #[test]
    fn null_keys_take_their_defaults() {
        let draft = parse(r#"{"theme": null, "initial_params": null}"#).unwrap();
        assert_eq!(draft, ConfigDraft::default());
    }

    #[test]
    fn missing_file() {
        let err = load("/definitely/not/here.json").unwrap_err();
        assert!(err.starts_with("cannot read"));
    }
}
