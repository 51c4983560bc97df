use super::types::SynthError;

/// Mixes equal-length buffers into one.
///
/// Samples are summed and divided by the number of buffers, so inputs
/// within [-1, 1] produce an output within [-1, 1].
///
/// # Errors
/// * If no buffers are given
/// * If the buffers differ in length
pub fn combine_buffers(buffers: &[Vec<f32>]) -> Result<Vec<f32>, SynthError> {
    let first = buffers.first().ok_or(SynthError::EmptyMix)?;
    let len = first.len();

    if let Some(other) = buffers.iter().find(|b| b.len() != len) {
        return Err(SynthError::LengthMismatch {
            expected: len,
            found: other.len(),
        });
    }

    let scale = 1.0 / buffers.len() as f32;
    let mut mix = vec![0.0f32; len];
    for buffer in buffers {
        for (out, &s) in mix.iter_mut().zip(buffer) {
            *out += s;
        }
    }
    mix.iter_mut().for_each(|s| *s *= scale);

    Ok(mix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_samples() {
        let mix = combine_buffers(&[vec![1.0, 0.0, -1.0], vec![0.0, 0.5, -1.0]]).unwrap();
        assert_eq!(mix, vec![0.5, 0.25, -1.0]);
    }

    #[test]
    fn single_buffer_is_unchanged() {
        let buffer = vec![0.1, -0.2, 0.3];
        assert_eq!(combine_buffers(&[buffer.clone()]).unwrap(), buffer);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = combine_buffers(&[vec![0.0; 4], vec![0.0; 3]]);
        assert!(matches!(
            result,
            Err(SynthError::LengthMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(combine_buffers(&[]), Err(SynthError::EmptyMix)));
    }
}
