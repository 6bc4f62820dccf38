use app_core::constants::{BLOW_HOLD_FRAMES, BLOW_THRESHOLD};
use app_core::{band_average, BlowDetector};

#[test]
fn band_average_of_nothing_is_silence() {
    assert_eq!(band_average(&[]), 0.0);
}

#[test]
fn band_average_is_the_mean_of_the_bins() {
    assert_eq!(band_average(&[10, 10, 10, 10]), 10.0);
    assert_eq!(band_average(&[0, 255]), 127.5);
    assert_eq!(band_average(&[1, 2, 3, 4, 5, 6]), 3.5);
}

#[test]
fn detector_requires_a_sustained_level() {
    let mut d = BlowDetector::new(100.0, 3);
    assert!(!d.feed(150.0));
    assert!(!d.feed(150.0));
    assert!(d.feed(150.0), "fires on the third consecutive loud frame");
}

#[test]
fn detector_does_not_refire_while_the_level_stays_high() {
    let mut d = BlowDetector::new(100.0, 3);
    for _ in 0..3 {
        d.feed(200.0);
    }
    for _ in 0..20 {
        assert!(!d.feed(200.0), "one trigger per sustained blow");
    }
}

#[test]
fn quiet_frame_resets_the_run_and_rearms() {
    let mut d = BlowDetector::new(100.0, 3);
    assert!(!d.feed(150.0));
    assert!(!d.feed(150.0));
    assert!(!d.feed(10.0), "quiet frame breaks the run");
    assert!(!d.feed(150.0));
    assert!(!d.feed(150.0));
    assert!(d.feed(150.0), "run restarts from zero after the break");
}

#[test]
fn threshold_is_exclusive() {
    let mut d = BlowDetector::new(100.0, 1);
    assert!(!d.feed(100.0), "exactly at the threshold does not count");
    assert!(d.feed(100.1));
}

#[test]
fn default_detector_uses_the_reference_tuning() {
    let mut d = BlowDetector::default();
    for i in 1..BLOW_HOLD_FRAMES {
        assert!(!d.feed(BLOW_THRESHOLD + 50.0), "frame {i} is too soon");
    }
    assert!(d.feed(BLOW_THRESHOLD + 50.0));
}
