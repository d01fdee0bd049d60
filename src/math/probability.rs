/// Shannon entropy of a weighted distribution, in bits
///
/// Uses the running sums kept per cell so that removing a pattern only needs
/// two subtractions:
///
/// `H = log2(Σw) - Σ(w·log2 w) / Σw`
///
/// Returns 0 when the weight sum is not positive.
pub fn shannon_entropy(sum_of_weights: f64, sum_of_weight_log_weights: f64) -> f64 {
    if sum_of_weights <= 0.0 {
        return 0.0;
    }
    sum_of_weights.log2() - sum_of_weight_log_weights / sum_of_weights
}

/// The `w·log2(w)` term a single pattern contributes to the entropy sum
pub fn weight_log_weight(weight: u32) -> f64 {
    if weight == 0 {
        return 0.0;
    }
    let weight = f64::from(weight);
    weight * weight.log2()
}
