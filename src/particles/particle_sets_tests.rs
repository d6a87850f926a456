use crate::particles::{SourceSet, TargetSet};
use crate::utils::GravityError;

#[test]
fn test_source_set_valid() {
    let positions = [(0.0, 0.0, 0.0), (1.0, 2.0, 3.0)];
    let masses = [1.0, 0.0];
    let softenings = [0.1, 0.2];
    let sources = SourceSet::new(&positions, &masses, Some(&softenings))
        .expect("Failed to create source set");
    assert_eq!(sources.len(), 2);
    assert_eq!(sources.position(1), (1.0, 2.0, 3.0));
    assert_eq!(sources.mass(1), 0.0);
    assert_eq!(sources.softening(0), 0.1);
}

#[test]
fn test_source_set_default_softening_is_zero() {
    let positions = [(0.0, 0.0, 0.0)];
    let sources = SourceSet::new(&positions, &[1.0], None).expect("Failed to create source set");
    assert_eq!(sources.softening(0), 0.0);
}

#[test]
fn test_source_set_length_mismatch() {
    let positions = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)];
    let result = SourceSet::new(&positions, &[1.0, 1.0, 1.0], None);
    assert_eq!(
        result.err(),
        Some(GravityError::LengthMismatch { field: "masses", expected: 2, found: 3 })
    );

    let result = SourceSet::new(&positions, &[1.0, 1.0], Some(&[0.1]));
    assert_eq!(
        result.err(),
        Some(GravityError::LengthMismatch { field: "softenings", expected: 2, found: 1 })
    );
}

#[test]
fn test_source_set_negative_mass() {
    let positions = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)];
    match SourceSet::new(&positions, &[1.0, -2.0], None) {
        Err(GravityError::InvalidMass { index, value }) => {
            assert_eq!(index, 1);
            assert_eq!(value, -2.0);
        }
        other => panic!("Expected InvalidMass, got {:?}", other),
    }
}

#[test]
fn test_source_set_negative_softening() {
    let positions = [(0.0, 0.0, 0.0)];
    match SourceSet::new(&positions, &[1.0], Some(&[-0.1])) {
        Err(GravityError::InvalidSoftening { index: 0, .. }) => (),
        other => panic!("Expected InvalidSoftening, got {:?}", other),
    }
}

#[test]
fn test_source_set_non_finite_position() {
    let positions = [(0.0, 0.0, 0.0), (f64::NAN, 0.0, 0.0)];
    let result = SourceSet::new(&positions, &[1.0, 1.0], None);
    assert_eq!(result.err(), Some(GravityError::NonFinitePosition { index: 1 }));
}

#[test]
fn test_target_set_validation() {
    let positions = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)];
    let targets = TargetSet::new(&positions, Some(&[0.0, 0.5])).expect("Failed to create target set");
    assert_eq!(targets.len(), 2);
    assert_eq!(targets.softening(1), 0.5);

    let result = TargetSet::new(&positions, Some(&[0.5]));
    assert_eq!(
        result.err(),
        Some(GravityError::LengthMismatch { field: "target softenings", expected: 2, found: 1 })
    );
    assert!(TargetSet::new(&positions, Some(&[0.0, f64::NAN])).is_err());
}

#[test]
fn test_target_set_from_sources_shares_softening() {
    let positions = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)];
    let softenings = [0.3, 0.4];
    let sources = SourceSet::new(&positions, &[1.0, 1.0], Some(&softenings))
        .expect("Failed to create source set");
    let targets = TargetSet::from_sources(&sources);
    assert_eq!(targets.len(), 2);
    assert_eq!(targets.position(1), (1.0, 0.0, 0.0));
    assert_eq!(targets.softening(1), 0.4);
}
