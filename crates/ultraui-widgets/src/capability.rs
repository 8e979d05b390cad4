use ultraui_engine::coords::Vec2;

/// Something that can paint itself onto a surface of type `S`.
///
/// The GPU button draws into a [`QuadSurface`](crate::QuadSurface); the
/// software button paints into a `Framebuffer`.
pub trait Drawable<S: ?Sized> {
    fn draw(&self, surface: &mut S);
}

/// Something that reacts to a primary-button press.
pub trait Clickable {
    /// Hit-tests `point` (in the widget's own coordinate space) and fires the
    /// click callback on a hit. Returns whether it hit.
    fn handle_click(&mut self, point: Vec2) -> bool;
}
