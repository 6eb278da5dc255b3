/// Coerce a raw sheet cell into a number.
///
/// Accepts percentages ("55%") and comma decimals ("1,75"). Anything that
/// does not parse to a finite, non-negative value reads as 0.
pub fn normalize(raw: &str) -> f64 {
    let cleaned = raw.trim().replace('%', "").replace(',', ".");
    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            if !cleaned.is_empty() {
                tracing::trace!("Coercing cell '{}' to 0", raw);
            }
            0.0
        }
    }
}
