//! The vocabulary provider: engine script API symbols, offered as input completions.
//! The connection core never consults this list.
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

pub const ENGINE_API: &[&str] = &[
    "Device.frame_count",
    "Device.last_delta_time",
    "Device.start",
    "Device.stop",
    "Device.create_resource_package",
    "Device.destroy_resource_package",
    "Window.show",
    "Window.hide",
    "Window.get_size",
    "Window.get_position",
    "Window.resize",
    "Window.move",
    "Window.minimize",
    "Window.restore",
    "Window.is_resizable",
    "Window.set_resizable",
    "Window.show_cursor",
    "Window.get_cursor_xy",
    "Window.set_cursor_xy",
    "Window.title",
    "Window.set_title",
    "Math.deg_to_rad",
    "Math.rad_to_deg",
    "Math.next_pow_2",
    "Math.is_pow_2",
    "Math.ceil",
    "Math.floor",
    "Math.sqrt",
    "Math.inv_sqrt",
    "Math.sin",
    "Math.cos",
    "Math.asin",
    "Math.acos",
    "Math.tan",
    "Math.atan2",
    "Math.abs",
    "Math.fmod",
    "Vec2.new",
    "Vec2.val",
    "Vec2.add",
    "Vec2.sub",
    "Vec2.mul",
    "Vec2.div",
    "Vec2.dot",
    "Vec2.equals",
    "Vec2.lower",
    "Vec2.greater",
    "Vec2.length",
    "Vec2.squared_length",
    "Vec2.set_length",
    "Vec2.normalize",
    "Vec2.negate",
    "Vec2.get_distance_to",
    "Vec2.get_angle_between",
    "Vec2.zero",
    "Vec3.new",
    "Vec3.val",
    "Vec3.add",
    "Vec3.sub",
    "Vec3.mul",
    "Vec3.div",
    "Vec3.dot",
    "Vec3.cross",
    "Vec3.equals",
    "Vec3.lower",
    "Vec3.greater",
    "Vec3.length",
    "Vec3.squared_length",
    "Vec3.set_length",
    "Vec3.normalize",
    "Vec3.negate",
    "Vec3.get_distance_to",
    "Vec3.get_angle_between",
    "Vec3.zero",
    "Quat.new",
    "Quat.negate",
    "Quat.load_identity",
    "Quat.length",
    "Quat.conjugate",
    "Quat.inverse",
    "Quat.cross",
    "Quat.mul",
    "Quat.pow",
    "StringSetting.value",
    "StringSetting.synopsis",
    "StringSetting.update",
    "IntSetting.value",
    "IntSetting.synopsis",
    "IntSetting.min",
    "IntSetting.max",
    "IntSetting.update",
    "FloatSetting.value",
    "FloatSetting.synopsis",
    "FloatSetting.min",
    "FloatSetting.max",
    "FloatSetting.update",
    "Mouse.button_pressed",
    "Mouse.button_released",
    "Mouse.any_pressed",
    "Mouse.any_released",
    "Mouse.cursor_xy",
    "Mouse.set_cursor_xy",
    "Mouse.cursor_relative_xy",
    "Mouse.set_cursor_relative_xy",
    "Mouse.MB_LEFT",
    "Mouse.KB_MIDDLE",
    "Mouse.MB_RIGHT",
    "Keyboard.modifier_pressed",
    "Keyboard.button_pressed",
    "Keyboard.button_released",
    "Keyboard.any_pressed",
    "Keyboard.any_released",
    "Keyboard.TAB",
    "Keyboard.ENTER",
    "Keyboard.ESCAPE",
    "Keyboard.SPACE",
    "Keyboard.BACKSPACE",
    "Keyboard.KP_0",
    "Keyboard.KP_1",
    "Keyboard.KP_2",
    "Keyboard.KP_3",
    "Keyboard.KP_4",
    "Keyboard.KP_5",
    "Keyboard.KP_6",
    "Keyboard.KP_7",
    "Keyboard.KP_8",
    "Keyboard.KP_9",
    "Keyboard.F1",
    "Keyboard.F2",
    "Keyboard.F3",
    "Keyboard.F4",
    "Keyboard.F5",
    "Keyboard.F6",
    "Keyboard.F7",
    "Keyboard.F8",
    "Keyboard.F9",
    "Keyboard.F10",
    "Keyboard.F11",
    "Keyboard.F12",
    "Keyboard.HOME",
    "Keyboard.LEFT",
    "Keyboard.UP",
    "Keyboard.RIGHT",
    "Keyboard.DOWN",
    "Keyboard.PAGE_UP",
    "Keyboard.PAGE_DOWN",
    "Keyboard.LCONTROL",
    "Keyboard.RCONTROL",
    "Keyboard.LSHIFT",
    "Keyboard.RSHIFT",
    "Keyboard.CAPS_LOCK",
    "Keyboard.LALT",
    "Keyboard.RALT",
    "Keyboard.LSUPER",
    "Keyboard.RSUPER",
    "Keyboard.NUM_0",
    "Keyboard.NUM_1",
    "Keyboard.NUM_2",
    "Keyboard.NUM_3",
    "Keyboard.NUM_4",
    "Keyboard.NUM_5",
    "Keyboard.NUM_6",
    "Keyboard.NUM_7",
    "Keyboard.NUM_8",
    "Keyboard.NUM_9",
    "Keyboard.A",
    "Keyboard.B",
    "Keyboard.C",
    "Keyboard.D",
    "Keyboard.E",
    "Keyboard.F",
    "Keyboard.G",
    "Keyboard.H",
    "Keyboard.I",
    "Keyboard.J",
    "Keyboard.K",
    "Keyboard.L",
    "Keyboard.M",
    "Keyboard.N",
    "Keyboard.O",
    "Keyboard.P",
    "Keyboard.Q",
    "Keyboard.R",
    "Keyboard.S",
    "Keyboard.T",
    "Keyboard.U",
    "Keyboard.V",
    "Keyboard.W",
    "Keyboard.X",
    "Keyboard.Y",
    "Keyboard.Z",
    "Keyboard.a",
    "Keyboard.b",
    "Keyboard.c",
    "Keyboard.d",
    "Keyboard.e",
    "Keyboard.f",
    "Keyboard.g",
    "Keyboard.h",
    "Keyboard.i",
    "Keyboard.j",
    "Keyboard.k",
    "Keyboard.l",
    "Keyboard.m",
    "Keyboard.n",
    "Keyboard.o",
    "Keyboard.p",
    "Keyboard.q",
    "Keyboard.r",
    "Keyboard.s",
    "Keyboard.t",
    "Keyboard.u",
    "Keyboard.v",
    "Keyboard.w",
    "Keyboard.x",
    "Keyboard.y",
    "Keyboard.z",
    "ResourcePackage.load",
    "ResourcePackage.unload",
    "ResourcePackage.flush",
    "ResourcePackage.has_loaded",
];

/// Returns the API symbols starting with `prefix`, in list order.
/// If nothing starts with the prefix, falls back to fuzzy matches, best first.
pub fn complete(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return ENGINE_API.to_vec();
    }

    let matches: Vec<&'static str> = ENGINE_API
        .iter()
        .copied()
        .filter(|symbol| symbol.starts_with(prefix))
        .collect();

    if !matches.is_empty() {
        return matches;
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize, &'static str)> = ENGINE_API
        .iter()
        .copied()
        .enumerate()
        .filter_map(|(index, symbol)| {
            matcher
                .fuzzy_match(symbol, prefix)
                .map(|score| (score, index, symbol))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, symbol)| symbol).collect()
}
