use followtheorder_core::{Point, Size};

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn window_size() -> Size {
    let window = gloo::utils::window();
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(390.);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(844.);
    Size::new(width as f32, height as f32)
}

/// Converts an element-relative offset (y down) into scene space (y up).
pub(crate) fn to_scene_point(offset_x: i32, offset_y: i32, scene_height: f32) -> Point {
    Point::new(offset_x as f32, scene_height - offset_y as f32)
}

/// Absolute placement for a node of `size` centered on `center`.
pub(crate) fn node_style(center: Point, size: Size, scene_height: f32) -> String {
    format!(
        "left: {}px; top: {}px; width: {}px; height: {}px;",
        center.x - size.width / 2.,
        scene_height - center.y - size.height / 2.,
        size.width,
        size.height
    )
}
