#![cfg_attr(not(test), no_std)]

//! Navigation core for the flipcard viewer: catalog, filtered addressing,
//! random picking, idle tracking, and the touch-driven state machine.

extern crate alloc;

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod idle;
pub mod input;
pub mod layout;
pub mod random;
pub mod render;
pub mod storage;
