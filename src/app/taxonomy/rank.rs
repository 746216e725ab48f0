use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Class rank in the secondary-school progression, S1 through S6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    OLevel,
    ALevel,
}

impl Level {
    pub fn code(&self) -> &'static str {
        match self {
            Level::OLevel => "O",
            Level::ALevel => "A",
        }
    }
}

// Rank lookup (normalized rank string -> rank)
static RANK_MAP: phf::Map<&'static str, Rank> = phf_map! {
    "S1" => Rank::S1,
    "S2" => Rank::S2,
    "S3" => Rank::S3,
    "S4" => Rank::S4,
    "S5" => Rank::S5,
    "S6" => Rank::S6,
};

impl Rank {
    /// Parse a free-form rank string ("S1", "s1", "S.1").
    /// Anything the backend or a form could hand us that is not one of the
    /// six ranks comes back as None.
    pub fn parse(input: &str) -> Option<Rank> {
        let normalized = input.trim().to_ascii_uppercase().replace('.', "");
        RANK_MAP.get(normalized.as_str()).copied()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rank::S1 => "S1",
            Rank::S2 => "S2",
            Rank::S3 => "S3",
            Rank::S4 => "S4",
            Rank::S5 => "S5",
            Rank::S6 => "S6",
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Rank::S1 | Rank::S2 | Rank::S3 | Rank::S4 => Level::OLevel,
            Rank::S5 | Rank::S6 => Level::ALevel,
        }
    }

    /// A-Level classes must carry a stream (Sciences/Arts); O-Level classes
    /// may leave it empty.
    pub fn requires_stream(&self) -> bool {
        self.level() == Level::ALevel
    }

    /// Successor in the promotion path. None means the rank graduates.
    pub fn next(&self) -> Option<Rank> {
        match self {
            Rank::S1 => Some(Rank::S2),
            Rank::S2 => Some(Rank::S3),
            Rank::S3 => Some(Rank::S4),
            Rank::S4 => Some(Rank::S5),
            Rank::S5 => Some(Rank::S6),
            Rank::S6 => None,
        }
    }
}

/// One entry of the rank selector catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankInfo {
    pub rank: Rank,
    pub level: Level,
    pub description: &'static str,
    pub requires_stream: bool,
}

static RANK_CATALOG: [RankInfo; 6] = [
    RankInfo {
        rank: Rank::S1,
        level: Level::OLevel,
        description: "Senior One",
        requires_stream: false,
    },
    RankInfo {
        rank: Rank::S2,
        level: Level::OLevel,
        description: "Senior Two",
        requires_stream: false,
    },
    RankInfo {
        rank: Rank::S3,
        level: Level::OLevel,
        description: "Senior Three",
        requires_stream: false,
    },
    RankInfo {
        rank: Rank::S4,
        level: Level::OLevel,
        description: "Senior Four",
        requires_stream: false,
    },
    RankInfo {
        rank: Rank::S5,
        level: Level::ALevel,
        description: "Senior Five",
        requires_stream: true,
    },
    RankInfo {
        rank: Rank::S6,
        level: Level::ALevel,
        description: "Senior Six",
        requires_stream: true,
    },
];

/// Fixed six-entry catalog, ordered S1 through S6.
pub fn available_ranks() -> &'static [RankInfo; 6] {
    &RANK_CATALOG
}

/// String-level variant kept total for legacy call sites: an unrecognized
/// rank counts as not requiring a stream.
pub fn rank_requires_stream(rank: &str) -> bool {
    Rank::parse(rank).is_some_and(|r| r.requires_stream())
}

/// "A" for S5/S6, "O" for everything else (unknown input included).
pub fn level_from_rank(rank: &str) -> &'static str {
    Rank::parse(rank)
        .map(|r| r.level().code())
        .unwrap_or(Level::OLevel.code())
}

/// Successor rank code. Returns None both for S6 (graduation) and for an
/// unrecognized rank; use the typed API when the two need to differ.
pub fn next_rank(rank: &str) -> Option<&'static str> {
    Rank::parse(rank).and_then(|r| r.next()).map(|r| r.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_o_level_ranks() {
        for rank in ["S1", "S2", "S3", "S4"] {
            assert!(!rank_requires_stream(rank), "{rank} should not need a stream");
            assert_eq!(level_from_rank(rank), "O");
        }
    }

    #[test]
    fn test_a_level_ranks() {
        for rank in ["S5", "S6"] {
            assert!(rank_requires_stream(rank), "{rank} should need a stream");
            assert_eq!(level_from_rank(rank), "A");
        }
    }

    #[test]
    fn test_case_insensitive_and_dotted() {
        assert_eq!(rank_requires_stream("s5"), rank_requires_stream("S5"));
        assert_eq!(Rank::parse("s.3"), Some(Rank::S3));
        assert_eq!(Rank::parse(" S6 "), Some(Rank::S6));
        assert_eq!(Rank::parse("P7"), None);
    }

    #[test]
    fn test_unknown_rank_falls_back_to_o_level() {
        assert!(!rank_requires_stream("garbage"));
        assert!(!rank_requires_stream(""));
        assert_eq!(level_from_rank("garbage"), "O");
    }

    #[test]
    fn test_promotion_chain_reaches_graduation() {
        let mut rank = "S1".to_string();
        for _ in 0..5 {
            rank = next_rank(&rank).expect("chain ended early").to_string();
        }
        assert_eq!(rank, "S6");
        assert_eq!(next_rank(&rank), None);
    }

    #[test]
    fn test_catalog_is_stable_and_ordered() {
        let first = available_ranks();
        let second = available_ranks();
        assert_eq!(first, second);
        let codes: Vec<&str> = first.iter().map(|info| info.rank.code()).collect();
        assert_eq!(codes, ["S1", "S2", "S3", "S4", "S5", "S6"]);
    }

    #[test]
    fn test_catalog_agrees_with_rank_requires_stream() {
        for info in available_ranks() {
            assert_eq!(info.requires_stream, rank_requires_stream(info.rank.code()));
            assert_eq!(info.level, info.rank.level());
        }
    }
}
