use web_sys as web;

/// Pointer position in client (viewport) CSS pixels, the same space as
/// `getBoundingClientRect`.
#[inline]
pub fn pointer_client_px(ev: &web::MouseEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}
