use raylib::prelude::*;
use wolf3d_raycaster::core::player::MotionIntent;

/// Held-key state to a motion intent (WASD or arrow keys).
pub fn read_intent(window: &RaylibHandle) -> MotionIntent {
    let down = |a: KeyboardKey, b: KeyboardKey| window.is_key_down(a) || window.is_key_down(b);
    MotionIntent::from_keys(
        down(KeyboardKey::KEY_W, KeyboardKey::KEY_UP),
        down(KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN),
        down(KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT),
        down(KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT),
    )
}

/// Edge-triggered toggles handled by the loop.
pub fn minimap_toggled(window: &RaylibHandle) -> bool {
    window.is_key_pressed(KeyboardKey::KEY_M)
}
