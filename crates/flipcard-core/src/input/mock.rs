use super::{TouchPoint, TouchProvider};

/// No-hardware touch source used during bring-up.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockTouch;

impl MockTouch {
    pub const fn new() -> Self {
        Self
    }
}

impl TouchProvider for MockTouch {
    type Error = core::convert::Infallible;

    fn poll_press(&mut self) -> Result<Option<TouchPoint>, Self::Error> {
        Ok(None)
    }
}
