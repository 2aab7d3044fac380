use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Impossible d'ouvrir le fichier {path:?} : {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Informations de flux introuvables : {0}")]
    Probe(String),
    #[error("Aucun flux audio dans le fichier")]
    NoAudioStream,
    #[error("Aucun décodeur disponible pour ce format : {0}")]
    UnsupportedCodec(String),
    #[error("Erreur de configuration du décodeur : {0}")]
    DecoderSetup(String),
    #[error("Erreur de décodage : {0}")]
    Decode(String),
    #[error("Erreur de rééchantillonnage : {0}")]
    Resample(String),
    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] std::io::Error),
}
