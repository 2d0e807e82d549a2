use wasm_bindgen::prelude::*;

mod game;
use game::CrateDrop;

tumble_web::export_game!(CrateDrop, "crate-drop");
