//! Mutable scene state advanced once per frame.
//!
//! Everything the original page kept in free-floating globals (flame flag,
//! candle light, camera, hover target, particle references, the pending
//! celebration timer) lives here on one context object, so the web frontend
//! owns a single instance and tests can build as many isolated scenes as
//! they need.
//!
//! Per frame the host calls [`SceneState::tick`] and then acts on the drained
//! [`SceneCue`]s (play a sound, kick off the font fetch, reveal the DOM
//! message). The scene never touches platform APIs itself.

use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::*;
use crate::particles::{
    launch_jitter, rising_jitter, ParticleBank, ParticleParams, ParticleSystemId,
};
use crate::pick::{pick_frame, Camera};
use crate::timeline::{StageAction, Timeline};
use crate::tween::{step_tween, Ease, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Mobile,
    Desktop,
}

impl SizeClass {
    /// The reference treats anything at most 768 CSS px wide as mobile.
    pub fn from_viewport_width(px: u32) -> Self {
        if px <= 768 {
            SizeClass::Mobile
        } else {
            SizeClass::Desktop
        }
    }

    pub fn confetti_count(self) -> usize {
        match self {
            SizeClass::Mobile => CONFETTI_COUNT_MOBILE,
            SizeClass::Desktop => CONFETTI_COUNT_DESKTOP,
        }
    }

    pub fn sparkle_count(self) -> usize {
        match self {
            SizeClass::Mobile => SPARKLE_COUNT_MOBILE,
            SizeClass::Desktop => SPARKLE_COUNT_DESKTOP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueKind {
    Blow,
    Confetti,
    Sparkle,
}

/// Requests the scene raises for its external collaborators. Every cue
/// degrades gracefully when the collaborator cannot honor it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneCue {
    PlayAudio(CueKind),
    /// Fetch the remote font; call [`SceneState::attach_age_label`] on
    /// success, log and move on otherwise.
    LoadAgeFont,
    RevealMessage,
    RevealSubline,
}

/// One photo frame: base layout plus per-frame bob and hover highlight.
#[derive(Clone, Debug)]
pub struct FrameVisual {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub color: Vec3,
    base_y: f32,
    hover_blend: f32,
    hover_tween: Option<Tween<f32>>,
}

impl FrameVisual {
    fn new(x: f32, y: f32, z: f32, rotation_y: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation_y,
            scale: 1.0,
            color: Vec3::from(FRAME_BASE_COLOR),
            base_y: y,
            hover_blend: 0.0,
            hover_tween: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FlowerVisual {
    pub position: Vec3,
    pub rotation_x: f32,
    pub rotation_z: f32,
    base_y: f32,
}

/// Ambient drifting point field; its size pulses once during the celebration.
#[derive(Clone, Debug)]
pub struct SparkleField {
    pub positions: Vec<Vec3>,
    pub rotation_y: f32,
    pub size: f32,
    size_tween: Option<Tween<f32>>,
}

/// The 3D age text, inserted only after the remote font resolves.
#[derive(Clone, Debug)]
pub struct AgeLabel {
    pub text: &'static str,
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,
    scale_tween: Option<Tween<f32>>,
    spin_tween: Option<Tween<f32>>,
}

/// One line of the congratulatory DOM overlay, tweened in opacity and
/// vertical offset.
#[derive(Clone, Debug, Default)]
struct OverlayLine {
    opacity: f32,
    offset_y: f32,
    opacity_tween: Option<Tween<f32>>,
    offset_tween: Option<Tween<f32>>,
    announced: bool,
}

impl OverlayLine {
    fn start(&mut self, delay: f32) {
        self.offset_y = MESSAGE_RISE_PX;
        self.opacity_tween =
            Some(Tween::new(0.0, 1.0, MESSAGE_FADE_SEC, Ease::Power2Out).with_delay(delay));
        self.offset_tween = Some(
            Tween::new(MESSAGE_RISE_PX, 0.0, MESSAGE_FADE_SEC, Ease::Power2Out).with_delay(delay),
        );
    }

    /// Returns true exactly once, on the frame the line first becomes
    /// visible (its delay has elapsed).
    fn step(&mut self, dt: f32) -> bool {
        let became_active = self
            .opacity_tween
            .as_ref()
            .map(|t| !t.active())
            .unwrap_or(false);
        if let Some(v) = step_tween(&mut self.opacity_tween, dt) {
            self.opacity = v;
        }
        if let Some(v) = step_tween(&mut self.offset_tween, dt) {
            self.offset_y = v;
        }
        if became_active && self.opacity > 0.0 && !self.announced {
            self.announced = true;
            return true;
        }
        false
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub seed: u64,
    pub size_class: SizeClass,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            size_class: SizeClass::Desktop,
        }
    }
}

pub struct SceneState {
    pub size_class: SizeClass,
    pub camera: Camera,
    pub frames: Vec<FrameVisual>,
    pub flowers: Vec<FlowerVisual>,
    pub sparkles: SparkleField,
    pub particles: ParticleBank,

    elapsed: f64,
    rng: StdRng,

    flame_visible: bool,
    pub flame_scale: [f32; 2],
    pub flame_offset_x: f32,
    pub cake_y: f32,
    candle_intensity: f32,
    light_tween: Option<Tween<f32>>,
    camera_tween: Option<Tween<Vec3>>,

    flower_emissive: Vec3,
    flower_tween: Option<Tween<Vec3>>,

    smoke: Option<ParticleSystemId>,
    confetti: Option<ParticleSystemId>,

    timeline: Timeline,
    celebration_started: bool,
    age_label: Option<AgeLabel>,
    message: OverlayLine,
    subline: OverlayLine,

    hover: Option<usize>,
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let frames = FRAME_LAYOUT
            .iter()
            .map(|&[x, y, z, ry]| FrameVisual::new(x, y, z, ry))
            .collect();
        let flowers = FLOWER_LAYOUT
            .iter()
            .map(|&[x, y, z]| FlowerVisual {
                position: Vec3::new(x, y, z),
                rotation_x: 0.0,
                rotation_z: 0.0,
                base_y: y,
            })
            .collect();
        let sparkle_positions = (0..config.size_class.sparkle_count())
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * SPARKLE_SPREAD,
                    (rng.gen::<f32>() - 0.5) * SPARKLE_SPREAD,
                    (rng.gen::<f32>() - 0.5) * SPARKLE_SPREAD,
                )
            })
            .collect();
        Self {
            size_class: config.size_class,
            camera: Camera {
                eye: Vec3::from(CAMERA_EYE),
                target: Vec3::from(CAMERA_TARGET),
                up: Vec3::Y,
                aspect: 16.0 / 9.0,
                fovy_radians: CAMERA_FOVY_DEG.to_radians(),
                znear: CAMERA_ZNEAR,
                zfar: CAMERA_ZFAR,
            },
            frames,
            flowers,
            sparkles: SparkleField {
                positions: sparkle_positions,
                rotation_y: 0.0,
                size: SPARKLE_BASE_SIZE,
                size_tween: None,
            },
            particles: ParticleBank::new(),
            elapsed: 0.0,
            rng,
            flame_visible: true,
            flame_scale: [1.0, 1.0],
            flame_offset_x: 0.0,
            cake_y: CAKE_BASE_Y,
            candle_intensity: BASE_LIGHT_INTENSITY,
            light_tween: None,
            camera_tween: None,
            flower_emissive: Vec3::from(FLOWER_EMISSIVE_BASE),
            flower_tween: None,
            smoke: None,
            confetti: None,
            timeline: Timeline::celebration(),
            celebration_started: false,
            age_label: None,
            message: OverlayLine::default(),
            subline: OverlayLine::default(),
            hover: None,
        }
    }

    // ---------------- queries ----------------

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
    pub fn flame_visible(&self) -> bool {
        self.flame_visible
    }
    pub fn candle_intensity(&self) -> f32 {
        self.candle_intensity
    }
    pub fn celebration_started(&self) -> bool {
        self.celebration_started
    }
    pub fn celebration_pending(&self) -> bool {
        self.timeline.pending() && !self.celebration_started
    }
    pub fn smoke_id(&self) -> Option<ParticleSystemId> {
        self.smoke
    }
    pub fn confetti_id(&self) -> Option<ParticleSystemId> {
        self.confetti
    }
    pub fn flower_emissive(&self) -> Vec3 {
        self.flower_emissive
    }
    pub fn age_label(&self) -> Option<&AgeLabel> {
        self.age_label.as_ref()
    }
    pub fn hovered_frame(&self) -> Option<usize> {
        self.hover
    }
    pub fn message_opacity(&self) -> f32 {
        self.message.opacity
    }
    pub fn message_offset_y(&self) -> f32 {
        self.message.offset_y
    }
    pub fn subline_opacity(&self) -> f32 {
        self.subline.opacity
    }
    pub fn subline_offset_y(&self) -> f32 {
        self.subline.offset_y
    }

    /// Flame tip in world space (the cake group bobs).
    pub fn flame_world_position(&self) -> Vec3 {
        Vec3::new(0.0, self.cake_y, 0.0) + Vec3::from(CANDLE_TIP_LOCAL)
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    // ---------------- trigger ----------------

    /// The candle-blown trigger, from a flame click or sustained mic level.
    ///
    /// Idempotent while the flame is hidden: a second call emits nothing and
    /// schedules nothing. A call while a previous schedule is still pending
    /// (after [`SceneState::relight_candle`]) restarts the schedule, so only
    /// the newest celebration fires.
    pub fn blow_out_candle(&mut self, cues: &mut Vec<SceneCue>) {
        if !self.flame_visible {
            return;
        }
        self.flame_visible = false;
        self.timeline.trigger(self.elapsed);
        // The extinguish stage sits at offset zero; run it synchronously so
        // smoke appears on the same frame as the trigger.
        self.poll_timeline(cues);
    }

    /// Restore the flame and light, re-arming the trigger.
    pub fn relight_candle(&mut self) {
        self.flame_visible = true;
        self.candle_intensity = BASE_LIGHT_INTENSITY;
        self.light_tween = None;
    }

    /// Insert the age text once its font resolved; starts the elastic pop
    /// and the full-turn spin.
    pub fn attach_age_label(&mut self) {
        let mut label = AgeLabel {
            text: AGE_LABEL_TEXT,
            position: Vec3::from(AGE_LABEL_POS),
            scale: AGE_LABEL_START_SCALE,
            rotation_y: 0.0,
            scale_tween: None,
            spin_tween: None,
        };
        label.scale_tween = Some(Tween::new(
            AGE_LABEL_START_SCALE,
            1.0,
            AGE_LABEL_SCALE_SEC,
            Ease::ElasticOut { period: 0.5 },
        ));
        label.spin_tween = Some(Tween::new(
            0.0,
            std::f32::consts::TAU,
            AGE_LABEL_SPIN_SEC,
            Ease::Power2InOut,
        ));
        self.age_label = Some(label);
    }

    // ---------------- picking ----------------

    pub fn flame_hit(&self, ndc_x: f32, ndc_y: f32) -> bool {
        if !self.flame_visible {
            return false;
        }
        let (ro, rd) = self.camera.ray_from_ndc(ndc_x, ndc_y);
        crate::pick::ray_sphere(ro, rd, self.flame_world_position(), FLAME_PICK_RADIUS).is_some()
    }

    pub fn pick_frame_at(&self, ndc_x: f32, ndc_y: f32) -> Option<usize> {
        let (ro, rd) = self.camera.ray_from_ndc(ndc_x, ndc_y);
        let centers: Vec<Vec3> = self.frames.iter().map(|f| f.position).collect();
        pick_frame(ro, rd, &centers, FRAME_PICK_RADIUS)
    }

    /// Move the highlight to `hit`. The previous frame eases back to scale
    /// 1.0 / base color, the new one toward 1.1 / highlight pink.
    pub fn update_hover(&mut self, hit: Option<usize>) {
        if hit == self.hover {
            return;
        }
        if let Some(prev) = self.hover.and_then(|i| self.frames.get_mut(i)) {
            prev.hover_tween = Some(Tween::new(
                prev.hover_blend,
                0.0,
                HOVER_FADE_SEC,
                Ease::Power2Out,
            ));
        }
        if let Some(next) = hit.and_then(|i| self.frames.get_mut(i)) {
            next.hover_tween = Some(Tween::new(
                next.hover_blend,
                1.0,
                HOVER_FADE_SEC,
                Ease::Power2Out,
            ));
        }
        self.hover = hit.filter(|i| *i < self.frames.len());
    }

    // ---------------- per-frame tick ----------------

    /// Advance the whole scene by `dt_sec`. Due timeline stages fire first,
    /// then tweens, ambient motion and the particle integrator. Cues raised
    /// this frame are appended to `cues`.
    pub fn tick(&mut self, dt_sec: f32, cues: &mut Vec<SceneCue>) {
        let dt = dt_sec.max(0.0);
        self.elapsed += dt as f64;

        self.poll_timeline(cues);
        self.step_tweens(dt, cues);
        self.ambient_motion();

        // One integration step per frame, fixed increments by design.
        self.particles.tick_all();
        if let Some(id) = self.smoke {
            if !self.particles.contains(id) {
                self.smoke = None;
            }
        }
        if let Some(id) = self.confetti {
            if !self.particles.contains(id) {
                self.confetti = None;
            }
        }
    }

    fn poll_timeline(&mut self, cues: &mut Vec<SceneCue>) {
        let mut actions: SmallVec<[StageAction; 4]> = SmallVec::new();
        self.timeline.poll(self.elapsed, &mut actions);
        for action in actions {
            match action {
                StageAction::ExtinguishCandle => self.extinguish_candle(cues),
                StageAction::StartCelebration => self.start_celebration(cues),
            }
        }
    }

    fn extinguish_candle(&mut self, cues: &mut Vec<SceneCue>) {
        cues.push(SceneCue::PlayAudio(CueKind::Blow));
        self.light_tween = Some(Tween::new(
            self.candle_intensity,
            0.0,
            LIGHT_FADE_SEC,
            Ease::Power2Out,
        ));
        match self
            .particles
            .spawn(&ParticleParams::smoke(), rising_jitter, &mut self.rng)
        {
            Ok(id) => self.smoke = Some(id),
            Err(e) => log::error!("smoke spawn failed: {e}"),
        }
    }

    fn start_celebration(&mut self, cues: &mut Vec<SceneCue>) {
        self.celebration_started = true;
        cues.push(SceneCue::PlayAudio(CueKind::Confetti));
        cues.push(SceneCue::PlayAudio(CueKind::Sparkle));
        cues.push(SceneCue::LoadAgeFont);

        let params = ParticleParams::confetti(self.size_class.confetti_count());
        match self.particles.spawn(&params, launch_jitter, &mut self.rng) {
            Ok(id) => self.confetti = Some(id),
            Err(e) => log::error!("confetti spawn failed: {e}"),
        }

        self.flower_tween = Some(Tween::new(
            self.flower_emissive,
            Vec3::from(FLOWER_EMISSIVE_PULSE),
            FLOWER_PULSE_SEC,
            Ease::Power2Out,
        ));
        self.sparkles.size_tween = Some(
            Tween::new(
                SPARKLE_BASE_SIZE,
                SPARKLE_PULSE_SIZE,
                SPARKLE_PULSE_SEC,
                Ease::Power2Out,
            )
            .with_yoyo(1),
        );
        self.camera_tween = Some(Tween::new(
            self.camera.eye,
            Vec3::from(CAMERA_EYE_CLOSE),
            CAMERA_DOLLY_SEC,
            Ease::Power2InOut,
        ));
        self.message.start(MESSAGE_DELAY_SEC);
        self.subline.start(SUBLINE_DELAY_SEC);
    }

    fn step_tweens(&mut self, dt: f32, cues: &mut Vec<SceneCue>) {
        if let Some(v) = step_tween(&mut self.light_tween, dt) {
            self.candle_intensity = v;
        }
        if let Some(v) = step_tween(&mut self.camera_tween, dt) {
            self.camera.eye = v;
        }
        if let Some(v) = step_tween(&mut self.flower_tween, dt) {
            self.flower_emissive = v;
        }
        if let Some(v) = step_tween(&mut self.sparkles.size_tween, dt) {
            self.sparkles.size = v;
        }
        for frame in &mut self.frames {
            if let Some(v) = step_tween(&mut frame.hover_tween, dt) {
                frame.hover_blend = v;
            }
            frame.scale = 1.0 + HOVER_SCALE_GAIN * frame.hover_blend;
            frame.color = Vec3::from(FRAME_BASE_COLOR)
                .lerp(Vec3::from(FRAME_HIGHLIGHT_COLOR), frame.hover_blend);
        }
        if let Some(label) = &mut self.age_label {
            if let Some(v) = step_tween(&mut label.scale_tween, dt) {
                label.scale = v;
            }
            if let Some(v) = step_tween(&mut label.spin_tween, dt) {
                label.rotation_y = v;
            }
        }
        if self.message.step(dt) {
            cues.push(SceneCue::RevealMessage);
        }
        if self.subline.step(dt) {
            cues.push(SceneCue::RevealSubline);
        }
    }

    fn ambient_motion(&mut self) {
        let t = self.elapsed as f32;
        self.cake_y = CAKE_BASE_Y + (t * 0.5).sin() * 0.05;
        for (i, frame) in self.frames.iter_mut().enumerate() {
            frame.position.y = frame.base_y + (t * 0.6 + i as f32).sin() * 0.05;
        }
        for (i, flower) in self.flowers.iter_mut().enumerate() {
            let phase = i as f32;
            flower.position.y = flower.base_y + (t * 0.4 + phase).sin() * 0.1;
            flower.rotation_x = (t * 0.3 + phase).sin() * 0.2;
            flower.rotation_z = (t * 0.3 + phase).cos() * 0.2;
        }
        if self.flame_visible {
            let flicker = self.rng.gen::<f32>() * 0.08;
            self.flame_scale = [
                1.0 + (t * 20.0).sin() * 0.1 + flicker,
                1.0 + (t * 30.0).sin() * 0.2 + flicker,
            ];
            self.flame_offset_x = (t * 5.0).sin() * 0.005;
            self.candle_intensity = BASE_LIGHT_INTENSITY * (1.0 - flicker * 8.0);
        }
        self.sparkles.rotation_y = t * 0.1;
        for (i, p) in self.sparkles.positions.iter_mut().enumerate() {
            p.y += (t + i as f32).sin() * 0.001;
        }
    }
}
