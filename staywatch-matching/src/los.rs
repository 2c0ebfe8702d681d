use staywatch_shared::RoomOffer;

/// Longest stay a pattern can encode.
pub const MAX_LOS_NIGHTS: i64 = 7;

/// Check whether any room offer supports the requested number of nights.
///
/// Each length-of-stay pattern is a 7-character string where position N
/// (1-indexed) says whether an N-night stay is bookable: 'Y' = available,
/// 'N' = not available. Example: "YYYNNNN" → 1, 2 or 3 nights.
///
/// Out-of-range nights, empty offers and malformed patterns all evaluate to
/// not-available; this never errors.
pub fn is_available_for_nights(offers: &[RoomOffer], nights: i64) -> bool {
    if offers.is_empty() {
        return false;
    }
    if nights < 1 || nights > MAX_LOS_NIGHTS {
        return false;
    }

    let index = (nights - 1) as usize;
    offers
        .iter()
        .any(|offer| has_availability(&offer.los_pattern, index))
}

/// True if any pattern in the list has 'Y' at the 0-based index.
fn has_availability(patterns: &[String], index: usize) -> bool {
    patterns
        .iter()
        .any(|pattern| is_position_available(pattern, index))
}

fn is_position_available(pattern: &str, index: usize) -> bool {
    pattern.as_bytes().get(index) == Some(&b'Y')
}
