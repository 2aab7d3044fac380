use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fréquence cible du rééchantillonnage (Hz) : quelques points par seconde suffisent
pub const DEFAULT_TARGET_SR: u32 = 10;

#[derive(Clone, Debug)]
pub struct ExtractionConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub mode: OutputMode,
    pub target_sr: u32,
    pub stream_selection: StreamSelection,
    pub aggregation: Aggregation,
}

impl ExtractionConfig {
    /// Préréglage "waveform" : premier flux audio, écriture tamponnée
    pub fn waveform(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            mode: OutputMode::Waveform,
            target_sr: DEFAULT_TARGET_SR,
            stream_selection: StreamSelection::First,
            aggregation: Aggregation::Cumulative,
        }
    }

    /// Préréglage "pcm" : meilleur flux audio, écriture au fil de l'eau
    pub fn pcm(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            mode: OutputMode::Pcm,
            stream_selection: StreamSelection::Best,
            ..Self::waveform(input_path, output_path)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputMode {
    /// Fichier tamponné, valeurs également renvoyées en mémoire
    Waveform,
    /// Fichier écrit valeur par valeur
    Pcm,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum StreamSelection {
    /// Premier flux audio décodable
    First,
    /// Flux par défaut du conteneur, sinon le premier
    Best,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Aggregation {
    /// Somme cumulée par canal, une valeur par échantillon
    Cumulative,
    /// Une valeur par canal et par trame
    FrameMean,
}
