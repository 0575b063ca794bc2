use crate::key::Key;

/// Frontend-facing application interface.
///
/// A frontend (SDL2, or a headless harness in tests) drives the emulator
/// exclusively through this trait: one `update` per rendered frame, key
/// events as they arrive, and `should_exit` polled between frames.
pub trait App {
    fn init(&mut self);
    /// Advance one frame and write RGB24 pixels into `screen`.
    fn update(&mut self, screen: &mut [u8]);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;
}
