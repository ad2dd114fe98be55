use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod controls;
mod game;
mod gui;
mod info;
mod modal;
mod sun;
use game::SolarSystem;

orrery_web::export_app!(SolarSystem, "solar-system");

/// Title of the planet card currently shown, empty when the modal is closed.
#[wasm_bindgen]
pub fn scene_info_title() -> String {
    with_runner(|r| r.app().info_title())
}

/// Body markup of the planet card currently shown.
#[wasm_bindgen]
pub fn scene_info_html() -> String {
    with_runner(|r| r.app().info_html())
}
