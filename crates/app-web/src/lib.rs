#![cfg(target_arch = "wasm32")]
//! Wasm entry point: builds the scene state, wires DOM/audio/mic
//! collaborators and starts the requestAnimationFrame loop. All simulation
//! logic lives in `app-core`; this crate only adapts it to the platform.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use app_core::{BlowDetector, SceneConfig, SceneState, SizeClass};

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn viewport_size_class(window: &web::Window) -> SizeClass {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0);
    SizeClass::from_viewport_width(width.max(0.0) as u32)
}

fn wire_music_toggle(cues: &Rc<audio::CueBank>) {
    if let Some(doc) = dom::window_document() {
        let cues = cues.clone();
        dom::add_click_listener(&doc, MUSIC_TOGGLE_ID, move || {
            let playing = cues.toggle_music();
            if let Some(doc) = dom::window_document() {
                overlay::set_music_icons(&doc, playing);
            }
        });
    }
}

/// The mic button asks for permission once; denial is logged and the button
/// simply reappears useless — the click trigger still works.
fn wire_mic_button(
    cues: &Rc<audio::CueBank>,
    analyser: &Rc<RefCell<Option<web::AnalyserNode>>>,
) {
    if let Some(doc) = dom::window_document() {
        let cues = cues.clone();
        let analyser = analyser.clone();
        dom::add_click_listener(&doc, MIC_BUTTON_ID, move || {
            let cues = cues.clone();
            let analyser = analyser.clone();
            spawn_local(async move {
                match audio::install_mic(cues.audio_ctx()).await {
                    Ok(node) => {
                        *analyser.borrow_mut() = Some(node);
                        if let Some(doc) = dom::window_document() {
                            dom::set_display(&doc, MIC_BUTTON_ID, "none");
                        }
                        log::info!("[mic] analyser installed");
                    }
                    Err(e) => log::error!("microphone setup failed: {e:?}"),
                }
            });
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("birthday scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let size_class = viewport_size_class(&window);
    let seed = js_sys::Date::now() as u64;
    let scene = Rc::new(RefCell::new(SceneState::new(SceneConfig {
        seed,
        size_class,
    })));
    log::info!("[scene] size_class={size_class:?} seed={seed}");

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let cues = Rc::new(
        audio::CueBank::new(audio_ctx).map_err(|_| anyhow::anyhow!("audio graph init failed"))?,
    );
    cues.load_all();
    wire_music_toggle(&cues);

    let analyser: Rc<RefCell<Option<web::AnalyserNode>>> = Rc::new(RefCell::new(None));
    wire_mic_button(&cues, &analyser);

    let mouse_state = Rc::new(RefCell::new(input::MouseState::default()));
    let blow_queued = Rc::new(RefCell::new(false));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        mouse_state: mouse_state.clone(),
        blow_queued: blow_queued.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        canvas,
        mouse: mouse_state,
        blow_queued,
        cues,
        analyser,
        detector: BlowDetector::default(),
        mic_bins: Vec::new(),
        last_instant: Instant::now(),
        cue_scratch: Vec::new(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
