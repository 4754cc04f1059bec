//! Phone number masking for the public tracking page

/// Mask the middle digits of a phone number: `13812345678` becomes
/// `138****5678`. Numbers shorter than seven characters are returned as-is.
#[must_use]
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 7 {
        return phone.to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[7..].iter().collect();
    format!("{head}****{tail}")
}
