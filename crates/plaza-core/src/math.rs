//! Pure mathematical functions for the pricing engine
//! All functions are deterministic and use fixed-point arithmetic

/// Multiply two u128 values and divide by a third, rounding DOWN
/// Falls back to quotient/remainder decomposition when `a * b` overflows,
/// which stays exact as long as `(a % c) * b` fits.
/// Returns None on overflow or division by zero
pub fn mul_div_down(a: u128, b: u128, c: u128) -> Option<u128> {
  if c == 0 {
    return None;
  }

  match a.checked_mul(b) {
    Some(product) => Some(product / c),
    None => {
      // floor(a*b/c) = (a/c)*b + floor((a%c)*b/c)
      let quotient = a / c;
      let remainder = a % c;
      quotient
        .checked_mul(b)?
        .checked_add(remainder.checked_mul(b)? / c)
    }
  }
}

/// Multiply two u128 values and divide by a third, rounding UP
/// Returns None on overflow or division by zero
pub fn mul_div_up(a: u128, b: u128, c: u128) -> Option<u128> {
  if c == 0 {
    return None;
  }

  match a.checked_mul(b) {
    Some(product) => {
      let down = product / c;
      if product % c == 0 {
        Some(down)
      } else {
        down.checked_add(1)
      }
    }
    None => {
      let quotient = a / c;
      let remainder = a % c;
      let scaled = remainder.checked_mul(b)?;
      let mut tail = scaled / c;
      if scaled % c != 0 {
        tail = tail.checked_add(1)?;
      }
      quotient.checked_mul(b)?.checked_add(tail)
    }
  }
}
