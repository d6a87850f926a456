use crate::direct::BruteForce;
use crate::parallel::{Dispatcher, FieldEvaluator, FieldSample, Quantity};
use crate::particles::{SourceSet, TargetSet};
use crate::test_helpers::random_points;
use crate::utils::{GravityError, Vec3};

/// Reports which target it was called for, so the partitioning can be checked.
struct IndexEcho;

impl FieldEvaluator for IndexEcho {
    fn evaluate(&self, position: Vec3, h_target: f64, skip: Option<usize>, _quantity: Quantity) -> FieldSample {
        FieldSample {
            acceleration: (position.0, h_target, skip.map_or(-1.0, |i| i as f64)),
            potential: 0.0,
        }
    }
}

#[test]
fn test_workers_and_chunk_size() {
    assert_eq!(Dispatcher::new(false, Some(8)).workers(), 1);
    assert_eq!(Dispatcher::new(true, Some(3)).workers(), 3);
    assert_eq!(Dispatcher::new(true, None).workers(), rayon::current_num_threads());

    let dispatcher = Dispatcher::new(true, Some(3));
    assert_eq!(dispatcher.chunk_size(9), 3);
    assert_eq!(dispatcher.chunk_size(10), 4);
    assert_eq!(dispatcher.chunk_size(2), 1);
    assert_eq!(Dispatcher::new(false, None).chunk_size(10), 10);
}

#[test]
fn test_every_target_written_exactly_once() {
    let positions: Vec<Vec3> = (0..23).map(|i| (i as f64, 0.0, 0.0)).collect();
    let softenings: Vec<f64> = (0..23).map(|i| i as f64 * 0.5).collect();
    let targets = TargetSet::new(&positions, Some(&softenings)).unwrap();
    for threads in [1, 2, 5, 23, 40] {
        let dispatcher = Dispatcher::new(true, Some(threads));
        let samples = dispatcher.run(&IndexEcho, &targets, true, Quantity::Both).unwrap();
        assert_eq!(samples.len(), 23);
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.acceleration, (i as f64, i as f64 * 0.5, i as f64));
        }
    }
}

#[test]
fn test_distinct_targets_have_no_skip() {
    let positions = [(1.0, 0.0, 0.0), (2.0, 0.0, 0.0)];
    let targets = TargetSet::new(&positions, None).unwrap();
    let samples = Dispatcher::default().run(&IndexEcho, &targets, false, Quantity::Both).unwrap();
    assert_eq!(samples[0].acceleration.2, -1.0);
    assert_eq!(samples[1].acceleration.2, -1.0);
}

#[test]
fn test_results_independent_of_worker_count() {
    let _ = env_logger::builder().is_test(true).try_init();
    let positions = random_points(300, 7);
    let masses = vec![1.0 / 300.0; 300];
    let sources = SourceSet::new(&positions, &masses, None).unwrap();
    let targets = TargetSet::from_sources(&sources);
    let direct = BruteForce::new(sources, 1.0);

    let serial = Dispatcher::new(false, None)
        .run(&direct, &targets, true, Quantity::Both)
        .unwrap();
    for threads in [Some(1), Some(2), Some(3), Some(8), None] {
        let parallel = Dispatcher::new(true, threads)
            .run(&direct, &targets, true, Quantity::Both)
            .unwrap();
        assert_eq!(serial, parallel, "results differ with {:?} workers", threads);
    }
}

#[test]
fn test_empty_targets() {
    let targets = TargetSet::new(&[], None).unwrap();
    let samples = Dispatcher::new(true, Some(4)).run(&IndexEcho, &targets, false, Quantity::Both).unwrap();
    assert!(samples.is_empty());
}

#[test]
fn test_zero_workers_is_an_error() {
    let positions = [(0.0, 0.0, 0.0)];
    let targets = TargetSet::new(&positions, None).unwrap();
    let result = Dispatcher::new(true, Some(0)).run(&IndexEcho, &targets, false, Quantity::Both);
    assert_eq!(result, Err(GravityError::InvalidThreadCount));
}
