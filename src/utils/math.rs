/// Standard normal CDF, `P(Z <= a)`.
pub fn normal_probability(a: f64) -> f64 {
    0.5 * (1.0 + libm::erf(a / (2.0f64).sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_probability_is_symmetric_around_zero() {
        assert!((normal_probability(0.0) - 0.5).abs() < 1e-12);
        for a in [0.3, 1.0, 2.5] {
            assert!((normal_probability(a) + normal_probability(-a) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn normal_probability_matches_table_values() {
        assert!((normal_probability(1.0) - 0.841_344_746).abs() < 1e-6);
        assert!((normal_probability(1.96) - 0.975_002_105).abs() < 1e-6);
        assert!(normal_probability(10.0) > 0.999_999);
    }
}
