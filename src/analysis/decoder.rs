use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Track};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::config::StreamSelection;
use crate::error::ExtractionError;

/// Flux audio ouvert : conteneur, piste sélectionnée et décodeur associé.
///
/// Toutes les ressources sont libérées au `Drop`, quel que soit le chemin de sortie.
pub struct AudioSource {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    codec: String,
    sample_rate: u32,
    channels: usize,
    sample_buf: Option<SampleBuffer<f32>>,
}

impl AudioSource {
    /// Ouvre le fichier, lit les informations de flux et prépare le décodeur
    pub fn open(path: &Path, selection: StreamSelection) -> Result<Self, ExtractionError> {
        let file = File::open(path).map_err(|source| ExtractionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // L'extension sert d'indice pour le sondage du conteneur
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| ExtractionError::Probe(e.to_string()))?;
        let format = probed.format;

        let track = select_track(format.tracks(), format.default_track(), selection)?;
        let track_id = track.id;
        let params = track.codec_params.clone();

        let codec = symphonia::default::get_codecs()
            .get_codec(params.codec)
            .map(|d| d.short_name.to_string())
            .unwrap_or_else(|| "inconnu".to_string());

        let decoder = make_decoder(&params)?;

        let sample_rate = params
            .sample_rate
            .filter(|&sr| sr > 0)
            .ok_or_else(|| {
                ExtractionError::DecoderSetup("fréquence d'échantillonnage inconnue".to_string())
            })?;
        let channels = params
            .channels
            .map(|c| c.count())
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                ExtractionError::DecoderSetup("disposition des canaux inconnue".to_string())
            })?;

        log::debug!(
            "Piste {} ouverte ({}, {} Hz, {} canaux) : {:?}",
            track_id,
            codec,
            sample_rate,
            channels,
            path
        );

        Ok(Self {
            format,
            decoder,
            track_id,
            codec,
            sample_rate,
            channels,
            sample_buf: None,
        })
    }

    pub fn track_id(&self) -> u32 {
        self.track_id
    }

    pub fn codec(&self) -> &str {
        &self.codec
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Décode la piste jusqu'à la fin du flux.
    ///
    /// Chaque trame décodée est passée à `on_frame` sous forme d'échantillons `f32`
    /// entrelacés. Toute erreur de lecture ou de décodage interrompt la boucle.
    /// Renvoie le nombre de trames décodées.
    pub fn for_each_frame<F>(&mut self, mut on_frame: F) -> Result<u64, ExtractionError>
    where
        F: FnMut(&[f32], usize) -> Result<(), ExtractionError>,
    {
        let mut frames = 0u64;

        loop {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(ExtractionError::Decode(e.to_string())),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = self
                .decoder
                .decode(&packet)
                .map_err(|e| ExtractionError::Decode(e.to_string()))?;

            let spec = *decoded.spec();
            let channels = spec.channels.count();
            check_channels(self.channels, channels)?;
            if decoded.frames() == 0 {
                continue;
            }

            let needed = decoded.capacity() * channels;
            if self.sample_buf.as_ref().map_or(true, |b| b.capacity() < needed) {
                self.sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
            }

            if let Some(buf) = self.sample_buf.as_mut() {
                buf.copy_interleaved_ref(decoded);
                on_frame(buf.samples(), channels)?;
                frames += 1;
            }
        }

        log::debug!("{} trames décodées sur la piste {}", frames, self.track_id);
        Ok(frames)
    }
}

/// Choisit la piste audio selon la stratégie demandée
fn select_track<'a>(
    tracks: &'a [Track],
    default: Option<&'a Track>,
    selection: StreamSelection,
) -> Result<&'a Track, ExtractionError> {
    let first = || tracks.iter().find(|t| t.codec_params.codec != CODEC_TYPE_NULL);

    let track = match selection {
        StreamSelection::First => first(),
        StreamSelection::Best => default
            .filter(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .or_else(first),
    };
    track.ok_or(ExtractionError::NoAudioStream)
}

fn make_decoder(params: &CodecParameters) -> Result<Box<dyn Decoder>, ExtractionError> {
    symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .map_err(|e| match e {
            SymphoniaError::Unsupported(what) => {
                ExtractionError::UnsupportedCodec(what.to_string())
            }
            other => ExtractionError::DecoderSetup(other.to_string()),
        })
}

/// Le nombre de canaux est figé à l'ouverture du flux
fn check_channels(expected: usize, got: usize) -> Result<(), ExtractionError> {
    if got != expected {
        return Err(ExtractionError::Decode(format!(
            "nombre de canaux modifié en cours de flux ({} -> {})",
            expected, got
        )));
    }
    Ok(())
}
