use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::audio::CueBank;
use crate::constants::*;
use crate::input;
use crate::{dom, overlay};
use app_core::{band_average, BlowDetector, SceneCue, SceneState};

/// Everything the per-frame callback needs, held behind one `Rc<RefCell<..>>`
/// for the RAF closure.
pub struct FrameContext {
    pub scene: Rc<RefCell<SceneState>>,
    pub canvas: web::HtmlCanvasElement,
    pub mouse: Rc<RefCell<input::MouseState>>,
    /// Set by the click handler when the flame was hit; consumed here so the
    /// trigger runs on the frame tick like the mic path does.
    pub blow_queued: Rc<RefCell<bool>>,
    pub cues: Rc<CueBank>,
    pub analyser: Rc<RefCell<Option<web::AnalyserNode>>>,
    pub detector: BlowDetector,
    pub mic_bins: Vec<u8>,
    pub last_instant: Instant,
    pub cue_scratch: Vec<SceneCue>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.cue_scratch.clear();
        {
            let mut scene = self.scene.borrow_mut();
            let w = self.canvas.width().max(1) as f32;
            let h = self.canvas.height().max(1) as f32;
            scene.set_aspect(w / h);

            // Mic-driven trigger
            if let Some(analyser) = self.analyser.borrow().as_ref() {
                let bins = analyser.frequency_bin_count() as usize;
                if self.mic_bins.len() != bins {
                    self.mic_bins.resize(bins, 0);
                }
                analyser.get_byte_frequency_data(&mut self.mic_bins);
                let level = band_average(&self.mic_bins);
                if self.detector.feed(level) {
                    log::info!("[mic] blow detected (level {level:.0})");
                    scene.blow_out_candle(&mut self.cue_scratch);
                }
            }

            // Pointer-driven trigger, queued by the click handler
            if std::mem::take(&mut *self.blow_queued.borrow_mut()) {
                scene.blow_out_candle(&mut self.cue_scratch);
            }

            // Hover highlight follows the pointer every frame
            let ndc = input::mouse_ndc(&self.canvas, &self.mouse.borrow());
            let hit = scene.pick_frame_at(ndc[0], ndc[1]);
            scene.update_hover(hit);

            scene.tick(dt, &mut self.cue_scratch);
        }

        for cue in self.cue_scratch.drain(..) {
            match cue {
                SceneCue::PlayAudio(kind) => self.cues.play(kind),
                SceneCue::LoadAgeFont => load_age_font(self.scene.clone()),
                SceneCue::RevealMessage => {
                    if let Some(doc) = dom::window_document() {
                        overlay::reveal_message(&doc);
                    }
                }
                SceneCue::RevealSubline => {
                    if let Some(doc) = dom::window_document() {
                        overlay::reveal_subline(&doc);
                    }
                }
            }
        }

        // Mirror the message tweens onto the DOM overlay
        if let Some(doc) = dom::window_document() {
            let scene = self.scene.borrow();
            if scene.message_opacity() > 0.0 {
                overlay::style_line(
                    &doc,
                    FINAL_MESSAGE_ID,
                    scene.message_opacity(),
                    scene.message_offset_y(),
                );
            }
            if scene.subline_opacity() > 0.0 {
                overlay::style_line(
                    &doc,
                    FINAL_SUBLINE_ID,
                    scene.subline_opacity(),
                    scene.subline_offset_y(),
                );
            }
        }
    }
}

/// Fetch the remote typeface; the label only ever appears if this resolves.
/// Failure is logged and the celebration continues without it.
fn load_age_font(scene: Rc<RefCell<SceneState>>) {
    spawn_local(async move {
        match fetch_ok(AGE_FONT_URL).await {
            Ok(()) => scene.borrow_mut().attach_age_label(),
            Err(e) => log::error!("font could not be loaded: {e:?}"),
        }
    });
}

async fn fetch_ok(url: &str) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: status {}", resp.status());
    }
    Ok(())
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
