use phf::phf_map;

// Subject lookup (subject name -> curriculum code)
static SUBJECT_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "English" => "ENG",
    "Mathematics" => "MTC",
    "Physics" => "PHY",
    "Chemistry" => "CHE",
    "Biology" => "BIO",
    "Geography" => "GEO",
    "History" => "HIS",
    "Christian Religious Education" => "CRE",
    "Islamic Religious Education" => "IRE",
    "Agriculture" => "AGR",
    "Commerce" => "COM",
    "Computer Studies" => "ICT",
    "Literature" => "LIT",
    "Fine Art" => "ART",
    "French" => "FRN",
    "General Paper" => "GP",
};

/// Curriculum code for an exact subject name.
pub fn get_subject_code(subject_name: &str) -> Option<&'static str> {
    SUBJECT_MAP.get(subject_name).copied()
}

/// Lookup tolerant of the shorthand teachers type into forms ("math",
/// "Bio", "computer"). Exact names win; otherwise a case-insensitive
/// substring match against the catalog decides.
pub fn find_subject_code(name: &str) -> Option<&'static str> {
    if let Some(code) = get_subject_code(name) {
        return Some(code);
    }

    let needle = name.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }

    SUBJECT_MAP
        .entries()
        .find(|(full_name, code)| {
            full_name.to_ascii_lowercase().contains(&needle)
                || code.eq_ignore_ascii_case(&needle)
        })
        .map(|(_, code)| *code)
}
