//! Greeks value object and quoting conventions.

/// Calendar days used to convert annual theta to a daily figure.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scale applied to vega and rho: sensitivity per one percentage point.
pub const PER_PERCENT_POINT: f64 = 0.01;

/// First- and second-order sensitivities of a European option.
///
/// Quoted the way options desks quote them:
/// - `theta` per calendar day (annual ∂V/∂t divided by 365)
/// - `vega` per 1% absolute move in volatility
/// - `rho` per 1% absolute move in the risk-free rate
///
/// `gamma` and `vega` are identical for calls and puts and never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t per day
    pub theta: f64,
    /// ∂V/∂σ per vol point
    pub vega: f64,
    /// ∂V/∂r per rate point
    pub rho: f64,
}

impl Greeks {
    /// Returns true when every sensitivity is finite.
    pub fn is_finite(&self) -> bool {
        [self.delta, self.gamma, self.theta, self.vega, self.rho]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Sensitivities of `quantity` contracts.
    pub fn scaled(&self, quantity: f64) -> Self {
        Self {
            delta: self.delta * quantity,
            gamma: self.gamma * quantity,
            theta: self.theta * quantity,
            vega: self.vega * quantity,
            rho: self.rho * quantity,
        }
    }
}

impl std::ops::Add for Greeks {
    type Output = Greeks;

    fn add(self, other: Greeks) -> Greeks {
        Greeks {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }
}

impl std::iter::Sum for Greeks {
    fn sum<I: Iterator<Item = Greeks>>(iter: I) -> Greeks {
        iter.fold(Greeks::default(), |acc, g| acc + g)
    }
}
