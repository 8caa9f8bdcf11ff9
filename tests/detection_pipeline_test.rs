//! Integration tests for the detection pipeline
//!
//! These tests run the complete pipeline over synthetic gaze recordings:
//! jittered fixation plateaus connected by fast position ramps, across
//! multiple trials.

use gazekit::pipeline::detector::{DetectorConfig, FixationDetector, ThresholdScope};
use gazekit::{ClassifiedSample, Fixation, Sample};

/// Deterministic jitter source so recordings are reproducible across runs.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform value in [-0.5, 0.5)
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    }
}

const SAMPLES_PER_FIXATION: usize = 50;
const SACCADE_LEN: usize = 5;
const SAMPLE_INTERVAL: f64 = 4.0; // ms, 250 Hz

/// Build one trial: three jittered plateaus joined by two fast ramps.
fn make_trial(trial: u64, rng: &mut Lcg) -> Vec<Sample> {
    let centers = [(100.0, 100.0), (300.0, 180.0), (150.0, 320.0)];
    let mut samples = Vec::new();
    let push = |x: f64, y: f64, samples: &mut Vec<Sample>| {
        let time = samples.len() as f64 * SAMPLE_INTERVAL;
        samples.push(Sample::new(time, trial, x, y));
    };

    for (i, &(cx, cy)) in centers.iter().enumerate() {
        for _ in 0..SAMPLES_PER_FIXATION {
            push(cx + rng.next() * 0.5, cy + rng.next() * 0.5, &mut samples);
        }
        if let Some(&(nx, ny)) = centers.get(i + 1) {
            for k in 1..=SACCADE_LEN {
                let t = k as f64 / (SACCADE_LEN + 1) as f64;
                push(cx + (nx - cx) * t, cy + (ny - cy) * t, &mut samples);
            }
        }
    }
    samples
}

fn make_recording(trials: u64) -> Vec<Sample> {
    let mut rng = Lcg::new(42);
    (1..=trials).flat_map(|t| make_trial(t, &mut rng)).collect()
}

/// Every non-saccade sample falls inside exactly one fixation of its trial;
/// every saccade sample falls inside none.
fn assert_partition(classified: &[ClassifiedSample], fixations: &[Fixation]) {
    for s in classified {
        let containing = fixations
            .iter()
            .filter(|f| f.trial == s.trial && f.start <= s.time && s.time <= f.end)
            .count();
        if s.is_saccade {
            assert_eq!(containing, 0, "saccade sample at t={} inside a fixation", s.time);
        } else {
            assert_eq!(
                containing, 1,
                "non-saccade sample at t={} in {} fixations",
                s.time, containing
            );
        }
    }
}

#[test]
fn test_three_trials_three_fixations_each() {
    let samples = make_recording(3);
    let detector = FixationDetector::with_defaults();
    let fixations = detector.detect(&samples).unwrap();

    assert_eq!(fixations.len(), 9);
    for trial in 1..=3u64 {
        assert_eq!(fixations.iter().filter(|f| f.trial == trial).count(), 3);
    }
}

#[test]
fn test_partition_property() {
    let samples = make_recording(2);
    let detector = FixationDetector::with_defaults();
    let classified = detector.classify_samples(&samples).unwrap();
    let fixations = detector.detect(&samples).unwrap();

    // The recording must actually contain saccades for this to be meaningful.
    assert!(classified.iter().any(|s| s.is_saccade));
    assert_partition(&classified, &fixations);
}

#[test]
fn test_fixations_chronological_and_well_formed() {
    let samples = make_recording(3);
    let fixations = FixationDetector::with_defaults().detect(&samples).unwrap();

    for f in &fixations {
        assert!(f.start <= f.end);
        assert!(f.dur >= 0.0);
        assert_eq!(f.dur, f.end - f.start);
    }
    for w in fixations.windows(2) {
        if w[0].trial == w[1].trial {
            assert!(w[0].end < w[1].start, "overlapping fixations within a trial");
        }
    }
}

#[test]
fn test_fixation_positions_near_plateau_centers() {
    let samples = make_recording(1);
    let fixations = FixationDetector::with_defaults().detect(&samples).unwrap();

    assert_eq!(fixations.len(), 3);
    let centers = [(100.0, 100.0), (300.0, 180.0), (150.0, 320.0)];
    for (f, &(cx, cy)) in fixations.iter().zip(centers.iter()) {
        assert!((f.x - cx).abs() < 2.0, "fixation x {} far from center {}", f.x, cx);
        assert!((f.y - cy).abs() < 2.0, "fixation y {} far from center {}", f.y, cy);
    }
}

#[test]
fn test_trial_boundary_always_splits() {
    // Two trials whose plateaus are at the same position: no saccade occurs
    // at the boundary, yet the fixations must not merge across it.
    let mut rng = Lcg::new(7);
    let mut samples = Vec::new();
    for trial in [1u64, 2] {
        for i in 0..SAMPLES_PER_FIXATION {
            samples.push(Sample::new(
                i as f64 * SAMPLE_INTERVAL,
                trial,
                200.0 + rng.next() * 0.5,
                200.0 + rng.next() * 0.5,
            ));
        }
    }

    let fixations = FixationDetector::with_defaults().detect(&samples).unwrap();
    assert_eq!(fixations.len(), 2);
    assert_eq!(fixations[0].trial, 1);
    assert_eq!(fixations[1].trial, 2);
}

#[test]
fn test_lambda_monotonicity_on_recording() {
    let samples = make_recording(2);
    let mut last_count = usize::MAX;
    for lambda in [2.0, 8.0, 15.0, 60.0, 1000.0] {
        let config = DetectorConfig {
            lambda,
            ..DetectorConfig::default()
        };
        let classified = FixationDetector::new(config)
            .classify_samples(&samples)
            .unwrap();
        let count = classified.iter().filter(|s| s.is_saccade).count();
        assert!(
            count <= last_count,
            "raising lambda to {lambda} increased saccade count to {count}"
        );
        last_count = count;
    }
}

#[test]
fn test_smoothing_endpoint_idempotence() {
    let samples = make_recording(1);
    for smooth in [false, true] {
        let config = DetectorConfig {
            smooth_coordinates: smooth,
            ..DetectorConfig::default()
        };
        let classified = FixationDetector::new(config)
            .classify_samples(&samples)
            .unwrap();
        assert_eq!(classified.first().unwrap().x, samples.first().unwrap().x);
        assert_eq!(classified.first().unwrap().y, samples.first().unwrap().y);
        assert_eq!(classified.last().unwrap().x, samples.last().unwrap().x);
        assert_eq!(classified.last().unwrap().y, samples.last().unwrap().y);
    }
}

#[test]
fn test_velocity_boundary_copying() {
    let samples = make_recording(1);
    let classified = FixationDetector::with_defaults()
        .classify_samples(&samples)
        .unwrap();
    let n = classified.len();
    assert_eq!(classified[0].vx, classified[1].vx);
    assert_eq!(classified[0].vy, classified[1].vy);
    assert_eq!(classified[n - 1].vx, classified[n - 2].vx);
    assert_eq!(classified[n - 1].vy, classified[n - 2].vy);
}

#[test]
fn test_per_trial_threshold_scope() {
    let samples = make_recording(3);
    let config = DetectorConfig {
        threshold_scope: ThresholdScope::PerTrial,
        ..DetectorConfig::default()
    };
    let detector = FixationDetector::new(config);
    let fixations = detector.detect(&samples).unwrap();
    let classified = detector.classify_samples(&samples).unwrap();

    assert_eq!(fixations.len(), 9);
    assert_partition(&classified, &fixations);
}

#[test]
fn test_detection_deterministic_across_runs() {
    let samples = make_recording(2);
    let detector = FixationDetector::with_defaults();
    let a = detector.detect(&samples).unwrap();
    let b = detector.detect(&samples).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_track_loss_does_not_panic() {
    // Blank out a stretch of coordinates (blink); the pipeline must neither
    // panic nor classify the NaN stretch as saccade.
    let mut samples = make_recording(1);
    for s in samples.iter_mut().skip(20).take(5) {
        s.x = f64::NAN;
        s.y = f64::NAN;
    }
    let classified = FixationDetector::with_defaults()
        .classify_samples(&samples)
        .unwrap();
    for s in classified.iter().skip(20).take(5) {
        assert!(!s.is_saccade);
    }
    let fixations = FixationDetector::with_defaults().detect(&samples).unwrap();
    assert!(!fixations.is_empty());
}
