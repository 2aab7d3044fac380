use crate::config::Aggregation;

/// Point moyen : `(somme * 2) / n`, tronqué vers zéro
fn average_point(sum: f32, n: usize) -> i32 {
    ((sum * 2.0) / n as f32) as i32
}

/// Agrège une trame `i16` entrelacée et émet chaque point strictement positif.
///
/// La somme des magnitudes repart de zéro pour chaque canal de chaque trame.
/// En mode `Cumulative`, un point est calculé après chaque échantillon à partir
/// de la somme courante ; en mode `FrameMean`, un seul point par canal.
/// Renvoie le nombre de valeurs émises.
pub fn aggregate<E>(
    samples: &[i16],
    channels: usize,
    mode: Aggregation,
    mut emit: impl FnMut(i32) -> Result<(), E>,
) -> Result<u64, E> {
    if channels == 0 {
        return Ok(0);
    }
    let n = samples.len() / channels;
    if n == 0 {
        return Ok(0);
    }

    let mut emitted = 0u64;
    for c in 0..channels {
        let mut sum = 0.0f32;
        for i in 0..n {
            sum += (samples[i * channels + c] as f32).abs();

            if mode == Aggregation::Cumulative {
                let point = average_point(sum, n);
                if point > 0 {
                    emit(point)?;
                    emitted += 1;
                }
            }
        }

        if mode == Aggregation::FrameMean {
            let point = average_point(sum, n);
            if point > 0 {
                emit(point)?;
                emitted += 1;
            }
        }
    }

    Ok(emitted)
}
