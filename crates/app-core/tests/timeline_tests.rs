// Trigger and celebration schedule tests, driven with a fake clock.

use app_core::constants::*;
use app_core::{
    CueKind, ParticleParent, SceneConfig, SceneCue, SceneState, SizeClass, StageAction, Timeline,
};
use smallvec::SmallVec;

fn mobile_scene() -> SceneState {
    SceneState::new(SceneConfig {
        seed: 42,
        size_class: SizeClass::Mobile,
    })
}

fn actions(timeline: &mut Timeline, now: f64) -> Vec<StageAction> {
    let mut out: SmallVec<[StageAction; 4]> = SmallVec::new();
    timeline.poll(now, &mut out);
    out.to_vec()
}

#[test]
fn timeline_is_inert_until_triggered() {
    let mut tl = Timeline::celebration();
    assert!(!tl.pending());
    assert!(actions(&mut tl, 100.0).is_empty());
}

#[test]
fn timeline_fires_stages_in_order_exactly_once() {
    let mut tl = Timeline::celebration();
    tl.trigger(1.0);
    assert_eq!(actions(&mut tl, 1.0), vec![StageAction::ExtinguishCandle]);
    assert!(tl.pending());
    assert!(actions(&mut tl, 1.25).is_empty(), "half the delay is too soon");
    assert_eq!(actions(&mut tl, 1.5), vec![StageAction::StartCelebration]);
    assert!(!tl.pending());
    assert!(actions(&mut tl, 99.0).is_empty(), "a stage fires once per trigger");
}

#[test]
fn retrigger_discards_the_pending_schedule() {
    let mut tl = Timeline::celebration();
    tl.trigger(0.0);
    assert_eq!(actions(&mut tl, 0.0), vec![StageAction::ExtinguishCandle]);

    // Re-arm before the celebration stage is due
    tl.trigger(0.3);
    assert_eq!(actions(&mut tl, 0.3), vec![StageAction::ExtinguishCandle]);
    assert!(
        actions(&mut tl, 0.6).is_empty(),
        "the first trigger's 0.5s mark must not fire after a restart"
    );
    assert_eq!(actions(&mut tl, 0.8), vec![StageAction::StartCelebration]);
}

#[test]
fn cancel_clears_pending_stages() {
    let mut tl = Timeline::celebration();
    tl.trigger(0.0);
    let _ = actions(&mut tl, 0.0);
    tl.cancel();
    assert!(!tl.pending());
    assert!(actions(&mut tl, 10.0).is_empty());
}

#[test]
fn blow_extinguishes_immediately() {
    let mut scene = mobile_scene();
    let mut cues = Vec::new();
    assert!(scene.flame_visible());

    scene.blow_out_candle(&mut cues);

    assert!(!scene.flame_visible(), "flame hides on the trigger frame");
    assert_eq!(cues, vec![SceneCue::PlayAudio(CueKind::Blow)]);
    let smoke = scene
        .particles
        .get(scene.smoke_id().expect("smoke spawned on the trigger frame"))
        .unwrap();
    assert_eq!(smoke.len(), SMOKE_COUNT);
    assert_eq!(smoke.parent(), ParticleParent::Cake);
    assert!(!scene.celebration_started(), "celebration waits for its delay");
    assert!(scene.celebration_pending());
}

#[test]
fn second_blow_is_a_noop_while_extinguished() {
    let mut scene = mobile_scene();
    let mut cues = Vec::new();
    scene.blow_out_candle(&mut cues);
    let first_smoke = scene.smoke_id();

    scene.blow_out_candle(&mut cues);
    assert_eq!(cues.len(), 1, "no second blow cue");
    assert_eq!(scene.particles.len(), 1, "no second smoke burst");
    assert_eq!(scene.smoke_id(), first_smoke);
}

#[test]
fn celebration_starts_half_a_second_after_the_blow() {
    let mut scene = mobile_scene();
    let mut cues = Vec::new();
    scene.blow_out_candle(&mut cues);
    cues.clear();

    scene.tick(0.25, &mut cues);
    assert!(!scene.celebration_started(), "0.25s is before the delay");
    assert!(cues.is_empty());

    scene.tick(0.3, &mut cues);
    assert!(scene.celebration_started(), "0.55s is past the delay");
    assert!(cues.contains(&SceneCue::PlayAudio(CueKind::Confetti)));
    assert!(cues.contains(&SceneCue::PlayAudio(CueKind::Sparkle)));
    assert!(cues.contains(&SceneCue::LoadAgeFont));

    let confetti = scene
        .particles
        .get(scene.confetti_id().expect("confetti spawned with the celebration"))
        .unwrap();
    assert_eq!(confetti.len(), CONFETTI_COUNT_MOBILE, "mobile budget");
    assert_eq!(confetti.parent(), ParticleParent::Scene);
    assert!(confetti.colors().is_some(), "confetti carries palette colors");
}

#[test]
fn desktop_scenes_use_the_larger_confetti_budget() {
    let mut scene = SceneState::new(SceneConfig {
        seed: 42,
        size_class: SizeClass::Desktop,
    });
    let mut cues = Vec::new();
    scene.blow_out_candle(&mut cues);
    scene.tick(0.6, &mut cues);
    let confetti = scene.particles.get(scene.confetti_id().unwrap()).unwrap();
    assert_eq!(confetti.len(), CONFETTI_COUNT_DESKTOP);
}

#[test]
fn candle_light_fades_out_over_half_a_second() {
    let mut scene = mobile_scene();
    let mut cues = Vec::new();
    assert!((scene.candle_intensity() - BASE_LIGHT_INTENSITY).abs() < 0.2);

    scene.blow_out_candle(&mut cues);
    scene.tick(0.2, &mut cues);
    let mid = scene.candle_intensity();
    assert!(mid < BASE_LIGHT_INTENSITY && mid > 0.0, "fading, not snapped");

    scene.tick(0.2, &mut cues);
    assert!(scene.candle_intensity() < mid);
    scene.tick(0.2, &mut cues);
    assert_eq!(scene.candle_intensity(), 0.0, "dark once the fade completes");
}

#[test]
fn relight_and_retrigger_cancels_the_first_schedule() {
    let mut scene = mobile_scene();
    let mut cues = Vec::new();
    scene.blow_out_candle(&mut cues); // trigger at t=0

    scene.relight_candle();
    assert!(scene.flame_visible());

    scene.tick(0.2, &mut cues); // t=0.2
    scene.blow_out_candle(&mut cues); // retrigger at t=0.2

    scene.tick(0.35, &mut cues); // t=0.55: first schedule's mark, cancelled
    assert!(
        !scene.celebration_started(),
        "the cancelled schedule must not fire at its old offset"
    );

    scene.tick(0.2, &mut cues); // t=0.75: 0.55s after the second trigger
    assert!(scene.celebration_started());
    let confetti_cues = cues
        .iter()
        .filter(|c| **c == SceneCue::PlayAudio(CueKind::Confetti))
        .count();
    assert_eq!(confetti_cues, 1, "exactly one celebration despite two triggers");
}

#[test]
fn full_celebration_run_reveals_message_then_subline() {
    let mut scene = mobile_scene();
    let mut all_cues = Vec::new();
    let mut step = Vec::new();
    scene.blow_out_candle(&mut step);
    all_cues.append(&mut step);

    for _ in 0..45 {
        scene.tick(0.1, &mut step); // 4.5 simulated seconds
        all_cues.append(&mut step);
    }

    let message_at = all_cues.iter().position(|c| *c == SceneCue::RevealMessage);
    let subline_at = all_cues.iter().position(|c| *c == SceneCue::RevealSubline);
    let (message_at, subline_at) = (
        message_at.expect("message reveal fired"),
        subline_at.expect("subline reveal fired"),
    );
    assert!(message_at < subline_at, "message precedes the subline");
    assert_eq!(
        all_cues.iter().filter(|c| **c == SceneCue::RevealMessage).count(),
        1
    );
    assert_eq!(
        all_cues.iter().filter(|c| **c == SceneCue::RevealSubline).count(),
        1
    );

    assert!((scene.message_opacity() - 1.0).abs() < 1e-4, "fade finished");
    assert!(scene.message_offset_y().abs() < 1e-3, "line settled at rest");

    // Long-running celebration tweens have also settled by now
    assert!((scene.camera.eye.z - CAMERA_EYE_CLOSE[2]).abs() < 1e-4);
    let emissive = scene.flower_emissive();
    assert!((emissive.x - FLOWER_EMISSIVE_PULSE[0]).abs() < 1e-4);
    assert!(
        (scene.sparkles.size - SPARKLE_BASE_SIZE).abs() < 1e-4,
        "yoyo pulse returns the sparkle size to its base"
    );
}

#[test]
fn age_label_pops_and_spins_after_attach() {
    let mut scene = mobile_scene();
    let mut cues = Vec::new();
    scene.attach_age_label();
    {
        let label = scene.age_label().expect("label attached");
        assert_eq!(label.text, AGE_LABEL_TEXT);
        assert_eq!(label.scale, AGE_LABEL_START_SCALE);
    }

    scene.tick(0.5, &mut cues);
    let early_scale = scene.age_label().unwrap().scale;
    assert!(early_scale > AGE_LABEL_START_SCALE, "pop under way");

    for _ in 0..7 {
        scene.tick(0.5, &mut cues); // 4.0s total, past both tweens
    }
    let label = scene.age_label().unwrap();
    assert!((label.scale - 1.0).abs() < 1e-3, "elastic settles at full size");
    assert!(
        (label.rotation_y - std::f32::consts::TAU).abs() < 1e-3,
        "one full turn"
    );
}
