//! Amounts are `f64` in the currency's major unit, rounded to cents at every
//! step that produces a stored or returned value.

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_cents(10.005_000_1), 10.01);
        assert_eq!(round_cents(3.333), 3.33);
        assert_eq!(round_cents(0.0), 0.0);
    }
}
