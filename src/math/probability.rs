use crate::io::error::{AlgorithmError, Result, computation_error};
use crate::math::random::unit_f64;
use rand::RngCore;

/// Select an item by weight after sharpening or flattening with a temperature
///
/// Zero and negative weights are dropped before anything else, so a set where
/// every remaining entry has zero weight is an error rather than a silent pick.
/// Each surviving weight is divided by the largest one, raised to
/// `1 / temperature` and normalized; the first item whose cumulative weight
/// exceeds a single uniform draw is returned, in the order given. A temperature
/// near zero sharpens the pick toward the heaviest item and a temperature above
/// one flattens it toward uniform.
///
/// # Errors
///
/// Returns an error if:
/// - `temperature` is not strictly positive
/// - No item has a positive weight
pub fn sample_with_temperature<T, R>(
    items: &[(T, f64)],
    temperature: f64,
    rng: &mut R,
) -> Result<T>
where
    T: Copy,
    R: RngCore + ?Sized,
{
    if temperature.is_nan() || temperature <= 0.0 {
        return Err(AlgorithmError::InvalidTemperature { temperature });
    }

    let heaviest = items
        .iter()
        .map(|&(_, weight)| weight)
        .filter(|weight| *weight > 0.0)
        .fold(0.0_f64, f64::max);

    // Scaled weights lie in (0, 1] with the heaviest at exactly 1
    let exponent = 1.0 / temperature;
    let adjusted: Vec<(T, f64)> = items
        .iter()
        .filter(|(_, weight)| *weight > 0.0)
        .map(|&(item, weight)| (item, (weight / heaviest).powf(exponent)))
        .collect();

    let Some(&(fallback, _)) = adjusted.last() else {
        return Err(computation_error(
            "weighted sampling",
            &"no candidate has a positive weight",
        ));
    };

    let total: f64 = adjusted.iter().map(|(_, weight)| weight).sum();
    let draw = unit_f64(rng);

    let mut cumulative = 0.0;
    for &(item, weight) in &adjusted {
        cumulative += weight / total;
        if draw < cumulative {
            return Ok(item);
        }
    }

    // Rounding can leave the cumulative sum a hair below the draw
    Ok(fallback)
}

/// Scale weights in place so they sum to one
///
/// Leaves the weights untouched when the total is not positive.
pub fn normalize(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for weight in weights.iter_mut() {
            *weight /= total;
        }
    }
}
