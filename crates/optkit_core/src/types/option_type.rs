//! Option direction.

use std::fmt;
use std::str::FromStr;

use super::error::ParseOptionTypeError;

/// European option direction.
///
/// # Examples
/// ```
/// use optkit_core::types::OptionType;
///
/// let put: OptionType = "PUT".parse().unwrap();
/// assert_eq!(put, OptionType::Put);
/// assert_eq!(put.to_string(), "put");
/// assert_eq!(put.intrinsic(90.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy: payoff max(S - K, 0)
    #[default]
    Call,
    /// Right to sell: payoff max(K - S, 0)
    Put,
}

impl OptionType {
    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }

    /// Payoff at expiry for the given spot and strike.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Lowercase name used in files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = ParseOptionTypeError;

    /// Parses case-insensitively; accepts "call"/"c" and "put"/"p".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ParseOptionTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" Put ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(err, ParseOptionTypeError("straddle".to_string()));
    }

    #[test]
    fn test_predicates() {
        assert!(OptionType::Call.is_call());
        assert!(!OptionType::Call.is_put());
        assert!(OptionType::Put.is_put());
    }

    #[test]
    fn test_intrinsic() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_display_round_trip() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let parsed: OptionType = option_type.to_string().parse().unwrap();
            assert_eq!(parsed, option_type);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OptionType::Put).unwrap(), "\"put\"");
        let parsed: OptionType = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(parsed, OptionType::Call);
    }
}
