//! Physical display abstraction.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// A monochrome panel the frame buffer can be flushed to.
///
/// Pixel traffic goes through the `DrawTarget` supertrait. Panels that keep
/// their own buffer (SSD1306 in buffered mode, the desktop simulator) push it
/// to the glass in [`present`](DisplayDevice::present).
pub trait DisplayDevice: DrawTarget<Color = BinaryColor> {
    /// Bring the panel up.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Make everything drawn since the last call visible.
    fn present(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
