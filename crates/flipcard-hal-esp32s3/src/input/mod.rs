pub mod touch;

pub use touch::{Ft6336Touch, TouchConfig, TouchError};
