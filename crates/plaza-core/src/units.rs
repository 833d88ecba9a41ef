//! Decimal string <-> fixed-point integer conversion, no floating point

/// Parse a decimal string such as "0.25" into an integer with `decimals`
/// fractional digits. Extra fractional digits are rejected rather than
/// rounded.
pub fn parse_units(value: &str, decimals: u32) -> Option<u128> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }

  let (whole, fraction) = match value.split_once('.') {
    Some((whole, fraction)) => (whole, fraction),
    None => (value, ""),
  };
  if whole.is_empty() && fraction.is_empty() {
    return None;
  }
  if fraction.len() > decimals as usize {
    return None;
  }
  if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }

  let scale = 10u128.checked_pow(decimals)?;
  let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
  let fraction_value: u128 = if fraction.is_empty() {
    0
  } else {
    let padding = 10u128.checked_pow(decimals - fraction.len() as u32)?;
    fraction.parse::<u128>().ok()?.checked_mul(padding)?
  };

  whole.checked_mul(scale)?.checked_add(fraction_value)
}

/// Render an integer with `decimals` fractional digits, trailing zeros trimmed
pub fn format_units(amount: u128, decimals: u32) -> String {
  let scale = 10u128.pow(decimals);
  let whole = amount / scale;
  let fraction = amount % scale;
  if fraction == 0 {
    return whole.to_string();
  }
  let digits = format!("{:0width$}", fraction, width = decimals as usize);
  format!("{}.{}", whole, digits.trim_end_matches('0'))
}
