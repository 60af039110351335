// src/gps/mod.rs
//! GPS sentence decoding and timestamp handling

pub mod data;
pub mod nmea;
pub mod time;

pub use data::{AggregatedFix, Sentence};
