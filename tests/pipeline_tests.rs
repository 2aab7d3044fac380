//! Tests d'intégration : fichiers WAV générés à la volée

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use wavelevels::{decode_to_pcm, decode_to_waveform, run, ExtractionConfig, ExtractionError};

const SR: u32 = 44100;
// Fréquence non multiple de 10 Hz : les points rééchantillonnés
// ne tombent pas tous sur un zéro
const FREQ: f32 = 437.0;

/// Écrit une sinusoïde 16 bits (même signal sur chaque canal)
fn write_sine(path: &Path, amplitude: f32, seconds: f32, channels: u16) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: SR,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let total = (seconds * SR as f32) as usize;
    for i in 0..total {
        let t = i as f32 / SR as f32;
        let s = (amplitude * (2.0 * PI * FREQ * t).sin() * i16::MAX as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(s).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn read_lines(path: &Path) -> Vec<i64> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.parse::<i64>().expect("une ligne n'est pas un entier"))
        .collect()
}

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn sine(&self, name: &str, amplitude: f32, seconds: f32, channels: u16) -> PathBuf {
        let path = self.path(name);
        write_sine(&path, amplitude, seconds, channels);
        path
    }
}

#[test]
fn test_missing_input_leaves_no_output() {
    let fx = Fixture::new();
    let out = fx.path("out.txt");

    let err = decode_to_pcm(fx.path("absent.mp3"), &out).unwrap_err();
    assert!(matches!(err, ExtractionError::Open { .. }), "{err}");
    assert!(!out.exists());

    let err = decode_to_waveform(fx.path("absent.mp3"), &out).unwrap_err();
    assert!(matches!(err, ExtractionError::Open { .. }), "{err}");
    assert!(!out.exists());
}

#[test]
fn test_non_audio_input_leaves_no_output() {
    let fx = Fixture::new();
    let input = fx.path("readme.txt");
    std::fs::write(&input, "aucun flux audio ici\n".repeat(64)).unwrap();
    let out = fx.path("out.txt");

    let err = decode_to_waveform(&input, &out).unwrap_err();
    assert!(matches!(err, ExtractionError::Probe(_)), "{err}");
    assert!(!out.exists());
}

#[test]
fn test_silence_produces_empty_file() {
    let fx = Fixture::new();
    let input = fx.sine("silence.wav", 0.0, 1.0, 1);
    let out = fx.path("out.txt");

    let values = decode_to_waveform(&input, &out).unwrap();

    assert!(values.is_empty());
    assert_eq!(std::fs::metadata(&out).unwrap().len(), 0);
}

#[test]
fn test_sine_output_is_positive_and_bounded() {
    let fx = Fixture::new();
    let input = fx.sine("sine.wav", 0.5, 2.0, 1);
    let out = fx.path("out.txt");

    decode_to_pcm(&input, &out).unwrap();
    let lines = read_lines(&out);

    // ~10 points par seconde et par canal
    assert!(!lines.is_empty());
    assert!(lines.len() <= 22, "{} lignes", lines.len());
    assert!(lines.iter().all(|&v| v > 0));
    // |s| <= 0.5 * 32767, et chaque trame ne contient qu'un ou deux points
    assert!(lines.iter().all(|&v| v <= 2 * 16_500));
}

#[test]
fn test_stereo_emits_per_channel() {
    let fx = Fixture::new();
    let mono = fx.sine("mono.wav", 0.5, 2.0, 1);
    let stereo = fx.sine("stereo.wav", 0.5, 2.0, 2);

    let mono_values = decode_to_waveform(&mono, fx.path("mono.txt")).unwrap();
    let stereo_values = decode_to_waveform(&stereo, fx.path("stereo.txt")).unwrap();

    assert!(!stereo_values.is_empty());
    assert!(stereo_values.len() <= 44, "{} lignes", stereo_values.len());
    assert!(stereo_values.len() >= mono_values.len());
}

#[test]
fn test_louder_input_yields_larger_values() {
    let fx = Fixture::new();
    let quiet = fx.sine("quiet.wav", 0.2, 2.0, 1);
    let loud = fx.sine("loud.wav", 0.8, 2.0, 1);

    let quiet_values = decode_to_waveform(&quiet, fx.path("quiet.txt")).unwrap();
    let loud_values = decode_to_waveform(&loud, fx.path("loud.txt")).unwrap();

    let total = |v: &[i32]| v.iter().map(|&x| x as i64).sum::<i64>();
    let max = |v: &[i32]| v.iter().copied().max().unwrap_or(0);

    assert!(!loud_values.is_empty());
    assert!(total(&loud_values) > total(&quiet_values));
    assert!(max(&loud_values) > max(&quiet_values));
}

#[test]
fn test_runs_are_byte_identical() {
    let fx = Fixture::new();
    let input = fx.sine("sine.wav", 0.6, 1.5, 2);
    let first = fx.path("a.txt");
    let second = fx.path("b.txt");

    decode_to_pcm(&input, &first).unwrap();
    decode_to_pcm(&input, &second).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_waveform_returns_what_it_writes() {
    let fx = Fixture::new();
    let input = fx.sine("sine.wav", 0.5, 1.5, 1);
    let out = fx.path("out.txt");

    let values = decode_to_waveform(&input, &out).unwrap();
    let written: Vec<i64> = read_lines(&out);

    assert_eq!(values.iter().map(|&v| v as i64).collect::<Vec<_>>(), written);
}

#[test]
fn test_both_modes_agree_on_single_track_file() {
    let fx = Fixture::new();
    let input = fx.sine("sine.wav", 0.5, 1.5, 2);
    let waveform_out = fx.path("waveform.txt");
    let pcm_out = fx.path("pcm.txt");

    decode_to_waveform(&input, &waveform_out).unwrap();
    decode_to_pcm(&input, &pcm_out).unwrap();

    assert_eq!(std::fs::read(&waveform_out).unwrap(), std::fs::read(&pcm_out).unwrap());
}

#[test]
fn test_report_describes_the_run() {
    let fx = Fixture::new();
    let input = fx.sine("sine.wav", 0.5, 1.0, 2);
    let out = fx.path("out.txt");

    let report = run(&ExtractionConfig::pcm(&input, &out)).unwrap();

    assert_eq!(report.metadata.sample_rate, SR);
    assert_eq!(report.metadata.channels, 2);
    assert_eq!(report.metadata.target_sr, 10);
    assert_eq!(report.metadata.codec, "pcm_s16le");
    assert!(report.output.frames_decoded > 0);
    assert_eq!(report.output.lines_written as usize, read_lines(&out).len());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["output"]["mode"], "Pcm");
}

#[test]
fn test_frame_mean_never_emits_more_than_cumulative() {
    let fx = Fixture::new();
    let input = fx.sine("sine.wav", 0.5, 2.0, 1);

    let cumulative = run(&ExtractionConfig::waveform(&input, fx.path("cumulative.txt"))).unwrap();
    let frame_mean = run(&ExtractionConfig {
        aggregation: wavelevels::Aggregation::FrameMean,
        ..ExtractionConfig::waveform(&input, fx.path("mean.txt"))
    })
    .unwrap();

    assert!(frame_mean.output.lines_written <= cumulative.output.lines_written);
    assert_eq!(frame_mean.output.frames_decoded, cumulative.output.frames_decoded);
}
