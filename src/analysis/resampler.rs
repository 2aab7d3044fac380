use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use symphonia::core::conv::FromSample;

use crate::error::ExtractionError;

/// Taille fixe des blocs d'entrée du resampler (en trames)
pub const CHUNK_SIZE: usize = 1024;

/// Trame rééchantillonnée, `i16` entrelacés
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResampledFrame {
    pub samples: Vec<i16>,
    pub channels: usize,
}

impl ResampledFrame {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Convertit les trames décodées vers la fréquence cible, en `i16` entrelacés.
///
/// Le resampler travaille par blocs de `CHUNK_SIZE` trames : les échantillons
/// en excès sont conservés pour l'appel suivant. Le reliquat final n'est jamais vidé.
pub struct FrameResampler {
    resampler: FastFixedIn<f32>,
    channels: usize,
    pending: Vec<Vec<f32>>,
    output: Vec<Vec<f32>>,
}

impl FrameResampler {
    pub fn new(source_sr: u32, target_sr: u32, channels: usize) -> Result<Self, ExtractionError> {
        if source_sr == 0 || target_sr == 0 || channels == 0 {
            return Err(ExtractionError::DecoderSetup(format!(
                "paramètres de rééchantillonnage invalides ({} Hz -> {} Hz, {} canaux)",
                source_sr, target_sr, channels
            )));
        }

        // Interpolation linéaire : un filtre passe-bas à 5 Hz effacerait le signal
        let ratio = target_sr as f64 / source_sr as f64;
        let resampler =
            FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Linear, CHUNK_SIZE, channels)
                .map_err(|e| ExtractionError::DecoderSetup(e.to_string()))?;

        let output = vec![vec![0.0f32; resampler.output_frames_max()]; channels];
        let pending = (0..channels).map(|_| Vec::with_capacity(CHUNK_SIZE * 2)).collect();

        Ok(Self {
            resampler,
            channels,
            pending,
            output,
        })
    }

    /// Trames en attente d'un bloc complet
    pub fn pending_frames(&self) -> usize {
        self.pending.first().map_or(0, |c| c.len())
    }

    /// Rééchantillonne une trame décodée (échantillons `f32` entrelacés)
    pub fn convert(&mut self, interleaved: &[f32]) -> Result<ResampledFrame, ExtractionError> {
        for frame in interleaved.chunks_exact(self.channels) {
            for (ch, sample) in frame.iter().enumerate() {
                self.pending[ch].push(*sample);
            }
        }

        let mut per_channel: Vec<Vec<f32>> = vec![Vec::new(); self.channels];
        loop {
            let needed = self.resampler.input_frames_next();
            if self.pending_frames() < needed {
                break;
            }

            let input: Vec<&[f32]> = self.pending.iter().map(|c| &c[..needed]).collect();
            let (_, out_len) = self
                .resampler
                .process_into_buffer(&input, &mut self.output, None)
                .map_err(|e| ExtractionError::Resample(e.to_string()))?;

            for (dst, src) in per_channel.iter_mut().zip(self.output.iter()) {
                dst.extend_from_slice(&src[..out_len]);
            }
            for ch in self.pending.iter_mut() {
                ch.drain(..needed);
            }
        }

        Ok(interleave_s16(&per_channel))
    }
}

/// Entrelace les canaux et convertit en `i16`
fn interleave_s16(per_channel: &[Vec<f32>]) -> ResampledFrame {
    let channels = per_channel.len();
    let frames = per_channel.iter().map(|c| c.len()).min().unwrap_or(0);

    let mut samples = Vec::with_capacity(frames * channels);
    for i in 0..frames {
        for ch in per_channel {
            samples.push(i16::from_sample(ch[i]));
        }
    }

    ResampledFrame { samples, channels }
}
