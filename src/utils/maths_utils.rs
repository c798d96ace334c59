use argminmax::ArgMinMax;

// Single pass over the slice. Caller guarantees `vec` is non-empty and NaN-free.
pub fn get_min_max(vec: &[f64]) -> (f64, f64) {
    let (min_index, max_index) = vec.argminmax();
    (vec[min_index], vec[max_index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let prices = [101.5, 99.0, 104.25, 100.0];
        assert_eq!(get_min_max(&prices), (99.0, 104.25));
        assert_eq!(get_min_max(&[7.0]), (7.0, 7.0));
    }
}
