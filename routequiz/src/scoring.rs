/// Points awarded for a correct guess on the given attempt (1-based).
///
/// First attempt is worth 10, then 7, 5, and 2. Attempts are naturally
/// bounded by the number of choices in a round, but the table defaults
/// to 0 beyond the fourth anyway.
pub fn points_for_attempt(attempt: u32) -> u32 {
    match attempt {
        1 => 10,
        2 => 7,
        3 => 5,
        4 => 2,
        _ => 0,
    }
}
