#![cfg_attr(not(test), no_std)]

//! Board adapters for the flipcard viewer: SD-card document store, capacitive
//! touch controller, Sharp memory LCD, and the screen renderer.
//!
//! Everything here is generic over `embedded-hal` traits; the firmware binary
//! supplies the ESP32-S3 peripherals.

extern crate alloc;

pub mod input;
pub mod platform;
pub mod render;
pub mod storage;
