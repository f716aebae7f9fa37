//! Deterministic identifier derivation for generated symbols.
//!
//! Both functions are pure and total over arbitrary input: symbol-only or
//! empty input yields an empty identifier rather than an error. The engine
//! does not guarantee global collision freedom; two distinct inline schemas
//! at different usage sites can still map to the same identifier, which is
//! an accepted limitation of usage-site naming.

/// Joins name parts with `_` and folds the result into a camel-case
/// identifier.
///
/// ASCII letters are kept and the letter following a separator (`_`, `-` or
/// space) is uppercased; digits pass through unchanged; every other symbol
/// is dropped. `upper_initial` controls the case of the first character when
/// it is a letter.
#[must_use]
pub fn to_identifier(upper_initial: bool, parts: &[&str]) -> String {
  let joined = parts.join("_");
  let input = joined.trim();

  let mut out = String::with_capacity(input.len());
  let mut uppercase_next = false;
  for (i, ch) in input.chars().enumerate() {
    if ch.is_ascii_alphabetic() {
      if i == 0 {
        out.push(if upper_initial {
          ch.to_ascii_uppercase()
        } else {
          ch.to_ascii_lowercase()
        });
      } else if uppercase_next {
        out.push(ch.to_ascii_uppercase());
      } else {
        out.push(ch);
      }
    }
    if ch.is_ascii_digit() {
      out.push(ch);
    }
    uppercase_next = matches!(ch, '_' | ' ' | '-');
  }
  out
}

/// Compacts a dotted display path into a short alias.
///
/// The uppercased initial of every `.`-separated segment is kept, and the
/// remainder of the last segment is appended verbatim:
/// `CreatePet.Request.Tag` becomes `CRTag`.
#[must_use]
pub fn abbreviate(dotted: &str) -> String {
  let mut initials = String::with_capacity(dotted.len());
  let mut tail = String::new();

  let mut at_segment_start = true;
  for ch in dotted.chars() {
    if ch == '.' {
      at_segment_start = true;
      continue;
    }
    if at_segment_start {
      initials.extend(ch.to_uppercase());
      tail.clear();
      at_segment_start = false;
    } else {
      tail.push(ch);
    }
  }

  initials.push_str(&tail);
  initials
}
