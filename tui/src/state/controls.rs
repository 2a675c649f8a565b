use regression_core::{Result, Session};

/// The controls of the play screen, in focus order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Control {
    #[default]
    Slope,
    Intercept,
    PredictionX,
    PointCount,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Slope,
        Control::Intercept,
        Control::PredictionX,
        Control::PointCount,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|&c| c == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Control::Slope => "slope m",
            Control::Intercept => "intercept c",
            Control::PredictionX => "predict at x",
            Control::PointCount => "points",
        }
    }

    /// Formats the value this control edits.
    pub fn value(self, session: &Session) -> String {
        match self {
            Control::Slope => format!("{:.2}", session.current().m),
            Control::Intercept => format!("{:.2}", session.current().c),
            Control::PredictionX => format!("{:.2}", session.prediction_x()),
            Control::PointCount => session.point_count().to_string(),
        }
    }

    /// Moves the value by `steps` increments.
    ///
    /// # Errors
    /// Only the point count can fail, when the new dataset cannot be generated.
    pub fn nudge(self, session: &mut Session, steps: i32) -> Result<()> {
        match self {
            Control::Slope => session.nudge_slope(steps),
            Control::Intercept => session.nudge_intercept(steps),
            Control::PredictionX => session.nudge_prediction_x(steps),
            Control::PointCount => return session.nudge_point_count(steps),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regression_core::{Dataset, SessionConfig};

    #[test]
    fn focus_cycles() {
        assert_eq!(Control::PointCount.next(), Control::Slope);
        assert_eq!(Control::Slope.previous(), Control::PointCount);
        assert_eq!(Control::Slope.next().next(), Control::PredictionX);
    }

    #[test]
    fn nudges_the_focused_value() {
        let config = SessionConfig {
            seed: Some(5),
            ..SessionConfig::default()
        };
        let dataset = Dataset::from_xy(&[(0., 0.), (1., 1.), (2., 2.)]);
        let mut session = Session::with_dataset(config, dataset).unwrap();

        Control::Slope.nudge(&mut session, 2).unwrap();
        Control::Intercept.nudge(&mut session, -1).unwrap();
        assert_eq!(Control::Slope.value(&session), "0.10");
        assert_eq!(Control::Intercept.value(&session), "-0.10");

        Control::PointCount.nudge(&mut session, 4).unwrap();
        assert_eq!(Control::PointCount.value(&session), "7");
        assert_eq!(Control::Slope.value(&session), "0.00");
    }
}
