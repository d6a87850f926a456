use crate::utils::{GravityConfig, GravityError, Method, DEFAULT_THETA};

#[test]
fn test_default_config() {
    let config = GravityConfig::default();
    assert_eq!(config.method, Method::Tree);
    assert_eq!(config.theta, DEFAULT_THETA);
    assert_eq!(config.g, 1.0);
    assert!(!config.parallel);
    assert_eq!(config.threads, None);
    assert_eq!(config.leaf_size, 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_new_fills_missing_fields() {
    let config = GravityConfig::new(None, Some(0.3), None, Some(true), Some(4));
    assert_eq!(config.method, Method::Tree);
    assert_eq!(config.theta, 0.3);
    assert_eq!(config.g, 1.0);
    assert!(config.parallel);
    assert_eq!(config.threads, Some(4));
}

#[test]
fn test_invalid_theta_is_rejected() {
    for theta in [0.0, -0.5, 1.5, f64::NAN] {
        let config = GravityConfig::new(None, Some(theta), None, None, None);
        match config.validate() {
            Err(GravityError::InvalidTheta(_)) => (),
            other => panic!("Expected InvalidTheta for {}, got {:?}", theta, other),
        }
    }
    // Upper bound is inclusive.
    assert!(GravityConfig::new(None, Some(1.0), None, None, None).validate().is_ok());
}

#[test]
fn test_non_finite_gravitational_constant_is_rejected() {
    for g in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let config = GravityConfig::new(None, None, Some(g), None, None);
        match config.validate() {
            Err(GravityError::InvalidGravitationalConstant(_)) => (),
            other => panic!("Expected InvalidGravitationalConstant for {}, got {:?}", g, other),
        }
    }
    assert!(GravityConfig::new(None, None, Some(6.674e-11), None, None).validate().is_ok());
}

#[test]
fn test_zero_threads_is_rejected() {
    let config = GravityConfig::new(None, None, None, Some(true), Some(0));
    assert_eq!(config.validate(), Err(GravityError::InvalidThreadCount));
}

#[test]
fn test_zero_leaf_size_is_rejected() {
    let config = GravityConfig::default().with_leaf_size(0);
    assert_eq!(config.validate(), Err(GravityError::InvalidLeafSize));
}

#[test]
fn test_method_from_str() {
    assert_eq!("tree".parse::<Method>(), Ok(Method::Tree));
    assert_eq!("bruteforce".parse::<Method>(), Ok(Method::BruteForce));
    assert_eq!(
        "adaptive".parse::<Method>(),
        Err(GravityError::UnknownMethod("adaptive".to_string()))
    );
    assert_eq!(Method::Tree.to_string(), "tree");
    assert_eq!(Method::BruteForce.to_string(), "bruteforce");
}

#[test]
fn test_method_for_problem_size() {
    assert_eq!(Method::for_problem_size(0), Method::BruteForce);
    assert_eq!(Method::for_problem_size(1000), Method::BruteForce);
    assert_eq!(Method::for_problem_size(1001), Method::Tree);
}
