/// Team name as it sometimes appears in the delivery data.
pub const RISING_PUNE_ALIAS: &str = "Rising Pune Supergiants";
/// Canonical spelling used in the match data.
pub const RISING_PUNE: &str = "Rising Pune Supergiant";

/// Canonical form of a team name used as a grouping key.
pub fn normalize_team(name: &str) -> &str {
    if name == RISING_PUNE_ALIAS {
        RISING_PUNE
    } else {
        name
    }
}
