pub mod sd_card;

pub use sd_card::{FixedTimeSource, SdCardStore, SdStoreError};
