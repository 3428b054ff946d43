//! Touch input abstraction.

mod mock;

pub use mock::MockTouch;

/// Press position in panel coordinates (landscape, origin top-left).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Polled touch source. Reports press edges only; a held finger yields one
/// point.
pub trait TouchProvider {
    type Error;

    fn poll_press(&mut self) -> Result<Option<TouchPoint>, Self::Error>;
}
