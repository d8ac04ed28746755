/// Separator between argument-substitution groups in a parallel-style
/// command line (`cmd ::: 1 2 3`).
pub const GROUP_DELIMITER: &str = ":::";

pub fn compress_command(command: &str) -> String {
    command
        .split(GROUP_DELIMITER)
        .map(|segment| compress_progression(segment.trim()))
        .collect::<Vec<_>>()
        .join(" ::: ")
}

/// Two or more integers with a constant step compress to `{first..last}`
/// (step 1) or `{first..last..step}`; anything else comes back unchanged.
pub fn compress_progression(tokens: &str) -> String {
    let digits_only = tokens.chars().filter(|&c| c != ' ').all(|c| c.is_ascii_digit());
    let parts: Vec<&str> = tokens.split_whitespace().collect();
    if !digits_only || parts.len() < 2 {
        return tokens.to_string();
    }

    // Tokens are all-digit at this point; parse still guards overflow.
    let values: Vec<i64> = match parts.iter().map(|p| p.parse()).collect() {
        Ok(v) => v,
        Err(_) => return tokens.to_string(),
    };

    let step = values[1] - values[0];
    if values.windows(2).any(|w| w[1] - w[0] != step) {
        return tokens.to_string();
    }

    let first = values[0];
    let last = values[values.len() - 1];
    if step == 1 {
        format!("{{{first}..{last}}}")
    } else {
        format!("{{{first}..{last}..{step}}}")
    }
}
