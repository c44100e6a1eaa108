//! Howl - a terminal music player for a local library
//!
//! The crate is split the same way the application runs:
//!
//! - `library`: song/album records, the persisted song store and the media index scan
//! - `source`: the asynchronous, readiness-gated loader that turns the library into a playback queue
//! - `engine`: playback engines behind the `PlaybackEngine` trait
//! - `model`: observable application state
//! - `controller`: user intents, key handling and background listeners
//! - `view`: ratatui rendering of the backdrop sheet, library and overlays
//! - `config` / `logging`: command line configuration and file logging

pub mod config;
pub mod controller;
pub mod engine;
pub mod library;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;
