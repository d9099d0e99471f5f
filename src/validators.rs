//! Checks applied to registration fields before they are persisted.

use crate::config::{MAX_SEATS, MIN_SEATS, SUPPORTED_CITIES};

/// A Saudi mobile number: exactly ten digits starting with `05`.
///
/// # Examples
///
/// ```
/// use taqtaq_db::validators::valid_phone;
///
/// assert!(valid_phone("0512345678"));
/// assert!(!valid_phone("+966512345678"));
/// ```
pub fn valid_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 10 && bytes.starts_with(b"05") && bytes.iter().all(u8::is_ascii_digit)
}

/// A full legal name: at least three whitespace-separated parts.
pub fn valid_name(name: &str) -> bool {
    name.split_whitespace().count() >= 3
}

/// Whether the service operates in the given city.
pub fn valid_city(city: &str) -> bool {
    SUPPORTED_CITIES.contains(&city)
}

/// Whether a captain may register this many seats.
pub fn valid_seats(seats: i32) -> bool {
    (MIN_SEATS..=MAX_SEATS).contains(&seats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone() {
        assert!(valid_phone("0500000000"));
        assert!(valid_phone("0599999999"));
        assert!(!valid_phone("0412345678")); // wrong prefix
        assert!(!valid_phone("051234567")); // nine digits
        assert!(!valid_phone("05123456789")); // eleven digits
        assert!(!valid_phone("051234567a"));
        assert!(!valid_phone("٠٥١٢٣٤٥٦٧٨")); // Arabic-Indic digits
        assert!(!valid_phone(""));
    }

    #[test]
    fn name() {
        assert!(valid_name("سالم محمد العتيبي"));
        assert!(valid_name("  نورة  عبدالله  القحطاني  "));
        assert!(valid_name("a b c d"));
        assert!(!valid_name("سالم محمد"));
        assert!(!valid_name("سالم"));
        assert!(!valid_name(""));
    }

    #[test]
    fn city() {
        assert!(valid_city("الرياض"));
        assert!(valid_city("جدة"));
        assert!(!valid_city("الدمام"));
        assert!(!valid_city(""));
    }

    #[test]
    fn seats() {
        assert!(valid_seats(1));
        assert!(valid_seats(8));
        assert!(!valid_seats(0));
        assert!(!valid_seats(9));
        assert!(!valid_seats(-1));
    }
}
