use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{Aggregation, OutputMode, StreamSelection};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub metadata: Metadata,
    pub output: OutputSummary,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Metadata {
    pub file_path: PathBuf,
    pub track_id: u32,
    pub codec: String,
    pub sample_rate: u32,
    pub channels: usize,
    pub target_sr: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputSummary {
    pub file_path: PathBuf,
    pub mode: OutputMode,
    pub stream_selection: StreamSelection,
    pub aggregation: Aggregation,
    pub frames_decoded: u64,
    pub lines_written: u64,
}
