//! FFmpeg CLI wrapper for clip concatenation.
//!
//! This crate provides:
//! - Type-safe multi-input FFmpeg command building
//! - A runner with timeout, kill-on-timeout, and stderr diagnostics capture
//! - The clip compositor: splice an ordered clip list into one video

pub mod command;
pub mod compose;
pub mod error;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use compose::concatenate;
pub use error::{MediaError, MediaResult};
