use super::state::StressState;
use super::stats::FrameStats;
use crate::config::BATCH_SIZE;
use fnv::FnvHashMap;
use smallvec::{smallvec, SmallVec};

/// Element ids the host page provides.
pub mod ids {
    // readouts
    pub const FPS: &str = "fps";
    pub const COUNT: &str = "count";
    pub const DRAW_CALLS: &str = "drawCalls";
    pub const TRIANGLES: &str = "triangles";
    pub const MEMORY: &str = "memory";
    pub const INTENSITY_VALUE: &str = "intensityValue";
    pub const CAMERA_DISTANCE_VALUE: &str = "cameraDistanceValue";
    pub const CAMERA_SPEED_VALUE: &str = "cameraSpeedValue";
    pub const OBJECT_ROTATION_SPEED_VALUE: &str = "objectRotationSpeedValue";

    // buttons
    pub const ADD_BATCH: &str = "addBatch";
    pub const REMOVE_BATCH: &str = "removeBatch";
    pub const TOGGLE_LIGHTS: &str = "toggleLights";
    pub const TOGGLE_BLOOM: &str = "toggleBloom";
    pub const TOGGLE_WIREFRAME: &str = "toggleWireframe";
    pub const TOGGLE_ROTATE: &str = "toggleRotate";
    pub const TOGGLE_OBJECT_ROTATION: &str = "toggleObjectRotation";

    // sliders
    pub const LIGHT_INTENSITY: &str = "lightIntensity";
    pub const CAMERA_DISTANCE: &str = "cameraDistance";
    pub const CAMERA_SPEED: &str = "cameraSpeed";
    pub const OBJECT_ROTATION_SPEED: &str = "objectRotationSpeed";

    pub const CANVAS: &str = "app-canvas";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Click,
    Input,
}

impl Trigger {
    pub fn event_name(self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::Input => "input",
        }
    }
}

/// A change the page should show after a handler ran.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayUpdate {
    Text { id: &'static str, text: String },
    /// Rendered as `data-active="true|false"` on toggle buttons.
    Active { id: &'static str, active: bool },
}

pub type Updates = SmallVec<[DisplayUpdate; 2]>;

/// Handler for one control. Sliders receive their coerced value, buttons 0.
pub type Handler = fn(&mut StressState, f32) -> Updates;

#[derive(Clone, Copy)]
pub struct Binding {
    pub element_id: &'static str,
    pub trigger: Trigger,
    pub apply: Handler,
}

pub const BINDINGS: &[Binding] = &[
    Binding {
        element_id: ids::ADD_BATCH,
        trigger: Trigger::Click,
        apply: on_add_batch,
    },
    Binding {
        element_id: ids::REMOVE_BATCH,
        trigger: Trigger::Click,
        apply: on_remove_batch,
    },
    Binding {
        element_id: ids::TOGGLE_LIGHTS,
        trigger: Trigger::Click,
        apply: on_toggle_lights,
    },
    Binding {
        element_id: ids::TOGGLE_BLOOM,
        trigger: Trigger::Click,
        apply: on_toggle_bloom,
    },
    Binding {
        element_id: ids::TOGGLE_WIREFRAME,
        trigger: Trigger::Click,
        apply: on_toggle_wireframe,
    },
    Binding {
        element_id: ids::TOGGLE_ROTATE,
        trigger: Trigger::Click,
        apply: on_toggle_rotate,
    },
    Binding {
        element_id: ids::TOGGLE_OBJECT_ROTATION,
        trigger: Trigger::Click,
        apply: on_toggle_object_rotation,
    },
    Binding {
        element_id: ids::LIGHT_INTENSITY,
        trigger: Trigger::Input,
        apply: on_light_intensity,
    },
    Binding {
        element_id: ids::CAMERA_DISTANCE,
        trigger: Trigger::Input,
        apply: on_camera_distance,
    },
    Binding {
        element_id: ids::CAMERA_SPEED,
        trigger: Trigger::Input,
        apply: on_camera_speed,
    },
    Binding {
        element_id: ids::OBJECT_ROTATION_SPEED,
        trigger: Trigger::Input,
        apply: on_object_rotation_speed,
    },
];

fn count_text(state: &StressState) -> DisplayUpdate {
    DisplayUpdate::Text {
        id: ids::COUNT,
        text: state.object_count().to_string(),
    }
}

fn on_add_batch(state: &mut StressState, _: f32) -> Updates {
    state.add_batch(BATCH_SIZE);
    smallvec![count_text(state)]
}

fn on_remove_batch(state: &mut StressState, _: f32) -> Updates {
    state.remove_batch(BATCH_SIZE);
    smallvec![count_text(state)]
}

fn on_toggle_lights(state: &mut StressState, _: f32) -> Updates {
    let active = state.toggle_lights_dynamic();
    smallvec![DisplayUpdate::Active {
        id: ids::TOGGLE_LIGHTS,
        active
    }]
}

fn on_toggle_bloom(state: &mut StressState, _: f32) -> Updates {
    let active = state.toggle_bloom();
    smallvec![DisplayUpdate::Active {
        id: ids::TOGGLE_BLOOM,
        active
    }]
}

fn on_toggle_wireframe(state: &mut StressState, _: f32) -> Updates {
    let active = state.toggle_wireframe();
    smallvec![DisplayUpdate::Active {
        id: ids::TOGGLE_WIREFRAME,
        active
    }]
}

fn on_toggle_rotate(state: &mut StressState, _: f32) -> Updates {
    let active = state.toggle_camera_auto_rotate();
    smallvec![DisplayUpdate::Active {
        id: ids::TOGGLE_ROTATE,
        active
    }]
}

fn on_toggle_object_rotation(state: &mut StressState, _: f32) -> Updates {
    let active = state.toggle_object_rotation();
    smallvec![DisplayUpdate::Active {
        id: ids::TOGGLE_OBJECT_ROTATION,
        active
    }]
}

fn on_light_intensity(state: &mut StressState, value: f32) -> Updates {
    state.set_light_intensity(value);
    smallvec![DisplayUpdate::Text {
        id: ids::INTENSITY_VALUE,
        text: format_number(value),
    }]
}

fn on_camera_distance(state: &mut StressState, value: f32) -> Updates {
    state.set_camera_distance(value);
    smallvec![DisplayUpdate::Text {
        id: ids::CAMERA_DISTANCE_VALUE,
        text: format_number(value),
    }]
}

fn on_camera_speed(state: &mut StressState, value: f32) -> Updates {
    state.set_camera_auto_rotate_speed(value);
    smallvec![DisplayUpdate::Text {
        id: ids::CAMERA_SPEED_VALUE,
        text: format_number(value),
    }]
}

fn on_object_rotation_speed(state: &mut StressState, value: f32) -> Updates {
    state.set_object_rotation_speed(value);
    smallvec![DisplayUpdate::Text {
        id: ids::OBJECT_ROTATION_SPEED_VALUE,
        text: format_number(value),
    }]
}

/// Control id -> binding lookup.
pub struct DispatchTable {
    by_id: FnvHashMap<&'static str, Binding>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchTable {
    pub fn new() -> Self {
        let by_id = BINDINGS.iter().map(|b| (b.element_id, *b)).collect();
        Self { by_id }
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.by_id.values()
    }

    pub fn get(&self, element_id: &str) -> Option<&Binding> {
        self.by_id.get(element_id)
    }

    /// Run the handler bound to `element_id`; `None` for unknown ids.
    pub fn dispatch(&self, state: &mut StressState, element_id: &str, value: f32) -> Option<Updates> {
        self.get(element_id).map(|b| (b.apply)(state, value))
    }
}

/// Coerce slider text the way a browser's `Number()` does: surrounding
/// whitespace ignored, empty means 0, `0x`/`0o`/`0b` integer prefixes,
/// `Infinity` spelled exactly, anything else unparsable is NaN.
pub fn parse_slider_value(raw: &str) -> f32 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f32::INFINITY,
        "-Infinity" => return f32::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return f32::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0f64, |acc, c| c.to_digit(radix).map(|d| acc * radix as f64 + d as f64))
            .map_or(f32::NAN, |v| v as f32);
    }
    // f32::from_str also takes "inf" and "nan" in any case
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return f32::NAN;
    }
    s.parse::<f32>().unwrap_or(f32::NAN)
}

/// Render like JS number-to-string: shortest digits of the f32, integers
/// without a fractional part ("250", "0.02"), exponent form outside
/// `[1e-6, 1e21)`, and no negative zero.
pub fn format_number(value: f32) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let s = format!("{:e}", value);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{}", value)
}

/// Readouts and toggle states to show before the first interaction.
pub fn initial_display(state: &StressState) -> Vec<DisplayUpdate> {
    let t = state.toggles;
    let s = state.sliders;
    vec![
        count_text(state),
        DisplayUpdate::Text {
            id: ids::INTENSITY_VALUE,
            text: format_number(s.light_intensity),
        },
        DisplayUpdate::Text {
            id: ids::CAMERA_DISTANCE_VALUE,
            text: format_number(s.camera_distance),
        },
        DisplayUpdate::Text {
            id: ids::CAMERA_SPEED_VALUE,
            text: format_number(s.camera_auto_rotate_speed),
        },
        DisplayUpdate::Text {
            id: ids::OBJECT_ROTATION_SPEED_VALUE,
            text: format_number(s.object_rotation_speed_scale),
        },
        DisplayUpdate::Active {
            id: ids::TOGGLE_LIGHTS,
            active: t.lights_dynamic,
        },
        DisplayUpdate::Active {
            id: ids::TOGGLE_BLOOM,
            active: t.bloom_enabled,
        },
        DisplayUpdate::Active {
            id: ids::TOGGLE_WIREFRAME,
            active: t.wireframe,
        },
        DisplayUpdate::Active {
            id: ids::TOGGLE_ROTATE,
            active: t.camera_auto_rotate,
        },
        DisplayUpdate::Active {
            id: ids::TOGGLE_OBJECT_ROTATION,
            active: t.objects_rotating,
        },
    ]
}

/// Per-frame stat readouts.
pub fn stats_display(stats: &FrameStats) -> [DisplayUpdate; 4] {
    [
        DisplayUpdate::Text {
            id: ids::FPS,
            text: stats.fps.to_string(),
        },
        DisplayUpdate::Text {
            id: ids::DRAW_CALLS,
            text: stats.draw_calls.to_string(),
        },
        DisplayUpdate::Text {
            id: ids::TRIANGLES,
            text: stats.triangles.to_string(),
        },
        DisplayUpdate::Text {
            id: ids::MEMORY,
            text: stats.memory_text(),
        },
    ]
}
