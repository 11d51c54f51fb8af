#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod events;
mod input;
mod presentation;
mod scheduler;

pub use presentation::WebPresentation;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cinescroll-web starting");
    Ok(())
}
