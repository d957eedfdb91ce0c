//! # stem-mixer
//!
//! Turns a YouTube link into a custom audio mix: the best audio track is
//! downloaded, split into stems by an external pretrained model, and the
//! stems matching a preset (karaoke, drumless, drums only) are overlaid
//! into a single MP3.

mod audio;
mod cache;
mod config;
mod error;
mod exporter;
mod fetcher;
mod mixer;
mod pipeline;
mod separator;
mod types;

pub use crate::{
    audio::{overlay_into, read_audio, write_audio},
    cache::MixCache,
    config::Settings,
    error::{MixError, Result},
    exporter::{Encoder, FfmpegEncoder},
    fetcher::{Fetcher, YtDlpFetcher},
    mixer::{mix_for_preset, select_stems},
    pipeline::MixPipeline,
    separator::{collect_stems, DemucsSeparator, Separator},
    types::{AudioData, MixPreset, Stem, StemRole},
};
