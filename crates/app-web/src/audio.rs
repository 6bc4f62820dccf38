//! Audio collaborators: one-shot celebration cues, looping background music
//! and the microphone analyser used for blow detection.
//!
//! Every asset is optional. A cue whose buffer has not loaded (or failed to)
//! is simply skipped; microphone denial disables the mic trigger and nothing
//! else.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::constants::*;
use app_core::CueKind;

type BufferSlot = Rc<RefCell<Option<web::AudioBuffer>>>;

pub struct CueBank {
    ctx: web::AudioContext,
    master: web::GainNode,
    music_gain: web::GainNode,
    blow: BufferSlot,
    confetti: BufferSlot,
    sparkle: BufferSlot,
    music: BufferSlot,
    music_source: Rc<RefCell<Option<web::AudioBufferSourceNode>>>,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

impl CueBank {
    pub fn new(ctx: web::AudioContext) -> Result<Self, ()> {
        let master = create_gain(&ctx, 1.0, "Master")?;
        _ = master.connect_with_audio_node(&ctx.destination());
        let music_gain = create_gain(&ctx, BACKGROUND_MUSIC_VOLUME, "Music")?;
        _ = music_gain.connect_with_audio_node(&master);
        Ok(Self {
            ctx,
            master,
            music_gain,
            blow: Rc::new(RefCell::new(None)),
            confetti: Rc::new(RefCell::new(None)),
            sparkle: Rc::new(RefCell::new(None)),
            music: Rc::new(RefCell::new(None)),
            music_source: Rc::new(RefCell::new(None)),
        })
    }

    pub fn audio_ctx(&self) -> &web::AudioContext {
        &self.ctx
    }

    /// Kick off all asset fetches; each resolves (or fails) independently.
    pub fn load_all(&self) {
        self.load_into(BLOW_SOUND_URL, self.blow.clone());
        self.load_into(CONFETTI_SOUND_URL, self.confetti.clone());
        self.load_into(SPARKLE_SOUND_URL, self.sparkle.clone());
        self.load_into(BACKGROUND_MUSIC_URL, self.music.clone());
    }

    fn load_into(&self, url: &'static str, slot: BufferSlot) {
        let ctx = self.ctx.clone();
        spawn_local(async move {
            match fetch_audio_buffer(&ctx, url).await {
                Ok(buffer) => *slot.borrow_mut() = Some(buffer),
                Err(e) => log::error!("audio load failed for {url}: {e:?}"),
            }
        });
    }

    /// Fire a one-shot cue; silently skipped while its buffer is missing.
    pub fn play(&self, kind: CueKind) {
        let slot = match kind {
            CueKind::Blow => &self.blow,
            CueKind::Confetti => &self.confetti,
            CueKind::Sparkle => &self.sparkle,
        };
        let Some(buffer) = slot.borrow().clone() else {
            return;
        };
        if let Ok(src) = self.ctx.create_buffer_source() {
            src.set_buffer(Some(&buffer));
            _ = src.connect_with_audio_node(&self.master);
            _ = src.start();
        }
    }

    /// Toggle looping background music; returns whether it is now playing.
    pub fn toggle_music(&self) -> bool {
        let mut source = self.music_source.borrow_mut();
        if let Some(src) = source.take() {
            _ = src.stop();
            return false;
        }
        let Some(buffer) = self.music.borrow().clone() else {
            return false;
        };
        _ = self.ctx.resume();
        if let Ok(src) = self.ctx.create_buffer_source() {
            src.set_buffer(Some(&buffer));
            src.set_loop(true);
            _ = src.connect_with_audio_node(&self.music_gain);
            _ = src.start();
            *source = Some(src);
            return true;
        }
        false
    }
}

async fn fetch_audio_buffer(
    ctx: &web::AudioContext,
    url: &str,
) -> anyhow::Result<web::AudioBuffer> {
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
    let array_buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!("{e:?}"))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let array_buf: js_sys::ArrayBuffer = array_buf
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let decoded = JsFuture::from(
        ctx.decode_audio_data(&array_buf)
            .map_err(|e| anyhow::anyhow!("{e:?}"))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("decode {url}: {e:?}"))?;
    decoded
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| anyhow::anyhow!("{e:?}"))
}

/// Ask for the microphone and wire it into a small analyser. Resolves to the
/// analyser used by the per-frame blow check; a denial surfaces as `Err` and
/// is logged by the caller — the feature just stays off.
pub async fn install_mic(ctx: &web::AudioContext) -> anyhow::Result<web::AnalyserNode> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&wasm_bindgen::JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("microphone access denied: {e:?}"))?;
    let stream: web::MediaStream = stream.dyn_into().map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let source = ctx
        .create_media_stream_source(&stream)
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    let analyser = web::AnalyserNode::new(ctx).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    analyser.set_fft_size(MIC_FFT_SIZE);
    _ = source.connect_with_audio_node(&analyser);
    Ok(analyser)
}
