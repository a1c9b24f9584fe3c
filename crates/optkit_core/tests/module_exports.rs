//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths.

use chrono::NaiveDate;

#[test]
fn test_distribution_exports() {
    use optkit_core::math::distributions::{norm_cdf, norm_pdf};

    let _ = norm_cdf(0.5_f64);
    let _ = norm_pdf(0.5_f64);
}

#[test]
fn test_solver_exports() {
    use optkit_core::math::solvers::{BisectionResult, BisectionSolver, SolverConfig};

    let solver = BisectionSolver::new(SolverConfig::new(1e-8, 100));
    let result: BisectionResult<f64> = solver.find_root(|x| x - 0.25, 0.0, 1.0);
    assert!(result.converged);
}

#[test]
fn test_types_exports() {
    use optkit_core::types::{
        parse_date, time_to_expiry, DateError, DayCountConvention, OptionType,
        ParseOptionTypeError, SolverError,
    };

    let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let expiration = parse_date("2025-01-01").unwrap();
    let t = time_to_expiry(valuation, expiration).unwrap();
    assert!(t > 1.0);

    assert_eq!(DayCountConvention::default(), DayCountConvention::ActualActual365);
    assert_eq!(OptionType::default(), OptionType::Call);

    let _: Option<DateError> = None;
    let _: Option<SolverError> = None;
    let _: Option<ParseOptionTypeError> = None;
}
