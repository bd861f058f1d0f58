use glam::Vec2;
use web_sys as web;

/// Normalized device coordinates of a point inside a `width` x `height`
/// viewport (x right, y up, both in \[-1, 1\]).
#[inline]
pub fn ndc_from_px(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

/// Pointer position relative to the canvas, in CSS pixels.
#[inline]
pub fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let pos = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    (pos, Vec2::new(rect.width() as f32, rect.height() as f32))
}

#[inline]
pub fn pointer_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let (pos, size) = pointer_canvas_css(ev, canvas);
    ndc_from_px(pos.x, pos.y, size.x, size.y)
}
