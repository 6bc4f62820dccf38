use app_core::{step_tween, Ease, Tween};
use glam::Vec3;

#[test]
fn linear_tween_samples_the_midpoint() {
    let mut t = Tween::new(0.0_f32, 10.0, 1.0, Ease::Linear);
    t.step(0.5);
    assert!((t.value() - 5.0).abs() < 1e-6);
    assert!(t.active());
    assert!(!t.finished());
}

#[test]
fn delay_holds_the_start_value() {
    let mut t = Tween::new(2.0_f32, 4.0, 1.0, Ease::Linear).with_delay(1.0);
    t.step(0.5);
    assert!(!t.active(), "still inside the delay");
    assert_eq!(t.value(), 2.0);

    t.step(1.0); // 1.5 total, 0.5 into the interpolation
    assert!(t.active());
    assert!((t.value() - 3.0).abs() < 1e-6);
}

#[test]
fn power2_out_decelerates_toward_the_end() {
    assert_eq!(Ease::Power2Out.apply(0.0), 0.0);
    assert_eq!(Ease::Power2Out.apply(1.0), 1.0);
    assert!((Ease::Power2Out.apply(0.5) - 0.75).abs() < 1e-6);
    assert!(
        Ease::Power2Out.apply(0.25) > 0.25,
        "eased-out curves run ahead of linear"
    );
}

#[test]
fn power2_inout_is_symmetric() {
    assert!((Ease::Power2InOut.apply(0.25) - 0.125).abs() < 1e-6);
    assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
    assert!((Ease::Power2InOut.apply(0.75) - 0.875).abs() < 1e-6);
}

#[test]
fn elastic_out_overshoots_then_settles() {
    let ease = Ease::ElasticOut { period: 0.5 };
    assert_eq!(ease.apply(0.0), 0.0);
    assert_eq!(ease.apply(1.0), 1.0);

    let overshoot = (1..100)
        .map(|i| ease.apply(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(overshoot > 1.0, "an elastic pop must swing past the target");
    assert!((ease.apply(0.95) - 1.0).abs() < 0.05, "nearly settled at the end");
}

#[test]
fn yoyo_returns_to_the_start_value() {
    // One repeat: forward, back, forward, back over four durations
    let mut t = Tween::new(0.0_f32, 1.0, 1.0, Ease::Linear).with_yoyo(1);
    t.step(1.0);
    assert!((t.value() - 1.0).abs() < 1e-6, "peak at the cycle boundary");
    t.step(0.5);
    assert!((t.value() - 0.5).abs() < 1e-6, "halfway back");
    t.step(0.5);
    assert!(t.finished());
    assert_eq!(t.value(), 0.0, "even cycle count ends at the start");
}

#[test]
fn step_tween_drops_the_slot_once_finished() {
    let mut slot = Some(Tween::new(0.0_f32, 1.0, 1.0, Ease::Linear));
    assert_eq!(step_tween(&mut slot, 0.25), Some(0.25));
    assert!(slot.is_some());

    let last = step_tween(&mut slot, 2.0);
    assert_eq!(last, Some(1.0), "final sample is the end value");
    assert!(slot.is_none(), "finished tween is dropped");
    assert_eq!(step_tween(&mut slot, 0.1), None);
}

#[test]
fn vec3_tweens_interpolate_componentwise() {
    let mut t = Tween::new(Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0), 2.0, Ease::Linear);
    t.step(1.0);
    let v = t.value();
    assert!((v - Vec3::new(1.0, 2.0, -3.0)).length() < 1e-6);
}

#[test]
fn oversized_step_clamps_to_the_end_value() {
    let mut t = Tween::new(1.0_f32, 3.0, 0.5, Ease::Power2Out);
    t.step(100.0);
    assert!(t.finished());
    assert_eq!(t.value(), 3.0);
}
