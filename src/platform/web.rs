//! Browser implementations of the platform collaborators

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlImageElement, Window};

use super::{Asset, AssetReadiness, AssetTracker, Display, Feedback, Renderer};
use crate::audio::AudioManager;
use crate::renderer::Sprite;
use crate::renderer::canvas::CanvasRenderer;
use crate::scheduler::{Scheduler, TimerId, Wakeup};
use crate::sim::{FallingKind, GameEvent, GamePhase};
use crate::tuning::Tuning;

/// DOM element ids the page must provide
pub mod ids {
    pub const CANVAS: &str = "gameCanvas";
    pub const SCOREBOARD: &str = "scoreboard";
    pub const START_SCREEN: &str = "startScreen";
    pub const GAME_OVER_SCREEN: &str = "gameOverScreen";
    pub const FINAL_SCORE: &str = "finalScore";
    pub const START_BUTTON: &str = "startButton";
    pub const RESTART_BUTTON: &str = "restartButton";
    pub const TUNING: &str = "tuning";
}

/// Start loading every sprite; each `onload` marks the tracker
pub fn load_images(tracker: &AssetTracker) -> Result<[HtmlImageElement; 3], JsValue> {
    let load = |asset: Asset| -> Result<HtmlImageElement, JsValue> {
        let img = HtmlImageElement::new()?;
        let tracker = tracker.clone();
        let onload = Closure::<dyn FnMut()>::new(move || tracker.mark_loaded(asset));
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::<dyn FnMut()>::new(move || {
            log::warn!("Failed to load {}", asset.path());
        });
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        img.set_src(asset.path());
        Ok(img)
    };
    Ok([load(Asset::Player)?, load(Asset::Collectible)?, load(Asset::Hazard)?])
}

/// Tuning from an optional inline `<script type="application/json">` block
pub fn load_tuning(document: &Document) -> Tuning {
    let Some(json) = document
        .get_element_by_id(ids::TUNING)
        .and_then(|el| el.text_content())
    else {
        return Tuning::default();
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning overrides");
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning overrides: {}", e);
            Tuning::default()
        }
    }
}

/// The page: sprites, sounds, scoreboard and screens
pub struct WebHost {
    pub assets: AssetTracker,
    pub audio: AudioManager,
    pub renderer: CanvasRenderer,
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new(
        window: Window,
        document: Document,
        assets: AssetTracker,
        renderer: CanvasRenderer,
    ) -> Self {
        Self {
            assets,
            audio: AudioManager::new(),
            renderer,
            window,
            document,
        }
    }

    fn set_visible(&self, id: &str, visible: bool) {
        let Some(el) = self
            .document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let display = if visible { "flex" } else { "none" };
        let _ = el.style().set_property("display", display);
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl AssetReadiness for WebHost {
    fn is_loaded(&self, asset: Asset) -> bool {
        self.assets.is_loaded(asset)
    }
}

impl Feedback for WebHost {
    fn on_event(&mut self, event: GameEvent) {
        self.audio.play(event.into());
    }
}

impl Display for WebHost {
    fn show_status(&mut self, status: &str) {
        self.set_text(ids::SCOREBOARD, status);
    }

    fn show_screen(&mut self, phase: GamePhase) {
        self.set_visible(ids::START_SCREEN, phase == GamePhase::Idle);
        self.set_visible(ids::GAME_OVER_SCREEN, phase == GamePhase::GameOver);
    }

    fn show_final_score(&mut self, score: u32) {
        self.set_text(ids::FINAL_SCORE, &format!("Score: {}", score));
    }

    fn notify(&mut self, notice: &str) {
        let _ = self.window.alert_with_message(notice);
    }
}

impl Renderer for WebHost {
    fn draw(&mut self, sprites: &[Sprite]) {
        self.renderer.draw(sprites);
    }
}

/// `setInterval` / `requestAnimationFrame` scheduler.
///
/// Every callback is routed through `dispatch`, which the owner points back
/// at the game.
pub struct BrowserScheduler {
    window: Window,
    dispatch: Rc<dyn Fn(Wakeup)>,
    intervals: HashMap<TimerId, (i32, Closure<dyn FnMut()>)>,
    next_id: u64,
}

impl BrowserScheduler {
    pub fn new(window: Window, dispatch: Rc<dyn Fn(Wakeup)>) -> Self {
        Self {
            window,
            dispatch,
            intervals: HashMap::new(),
            next_id: 0,
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_periodic(&mut self, kind: FallingKind, period_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);

        let dispatch = self.dispatch.clone();
        let closure = Closure::<dyn FnMut()>::new(move || dispatch(Wakeup::Spawn(kind)));
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms.min(i32::MAX as u32) as i32,
            ) {
            Ok(handle) => {
                self.intervals.insert(id, (handle, closure));
            }
            Err(e) => log::error!("setInterval failed for {:?}: {:?}", kind, e),
        }
        id
    }

    fn request_frame(&mut self) {
        let dispatch = self.dispatch.clone();
        let closure = Closure::once(move |_time: f64| dispatch(Wakeup::Frame));
        let _ = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some((handle, _closure)) = self.intervals.remove(&id) {
            self.window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for (_, (handle, _closure)) in self.intervals.drain() {
            self.window.clear_interval_with_handle(handle);
        }
    }
}
