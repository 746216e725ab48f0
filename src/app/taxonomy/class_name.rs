use super::rank::Rank;

/// Derive the display name shown for a class, e.g. ("S5", "Sciences")
/// becomes "S.5 Sciences". The name is always computed from rank and
/// stream; nothing stores it independently.
///
/// Total over arbitrary strings: an empty rank yields an empty name, a rank
/// without the leading S is carried through untouched.
pub fn generate_class_name(rank: &str, stream: Option<&str>) -> String {
    let rank = rank.trim();
    if rank.is_empty() {
        return String::new();
    }

    let mut name = match rank.strip_prefix('S').or_else(|| rank.strip_prefix('s')) {
        Some(rest) if rest.starts_with('.') => format!("S{rest}"),
        Some(rest) => format!("S.{rest}"),
        None => rank.to_string(),
    };

    if let Some(stream) = stream {
        let stream = stream.trim();
        if !stream.is_empty() {
            name.push(' ');
            name.push_str(stream);
        }
    }

    name
}

/// Typed front of the same derivation, for call sites already holding a
/// parsed rank.
pub fn class_name(rank: Rank, stream: Option<&str>) -> String {
    generate_class_name(rank.code(), stream)
}
