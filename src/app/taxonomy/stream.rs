use super::rank::rank_requires_stream;

/// One selectable stream for the class form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOption {
    /// Value submitted to the backend. Empty string means "no stream".
    pub value: &'static str,
    pub label: &'static str,
}

/// A-Level classes split into exactly these two combinations; there is no
/// "no stream" entry because a stream is mandatory at that level.
pub static A_LEVEL_STREAMS: [StreamOption; 2] = [
    StreamOption {
        value: "Sciences",
        label: "Sciences",
    },
    StreamOption {
        value: "Arts",
        label: "Arts",
    },
];

/// O-Level classes may run unstreamed or as one of the lettered streams.
pub static O_LEVEL_STREAMS: [StreamOption; 4] = [
    StreamOption {
        value: "",
        label: "No stream",
    },
    StreamOption {
        value: "A",
        label: "Stream A",
    },
    StreamOption {
        value: "B",
        label: "Stream B",
    },
    StreamOption {
        value: "C",
        label: "Stream C",
    },
];

/// Stream choices for a rank selector value. Total over arbitrary strings:
/// anything that is not an A-Level rank gets the O-Level list.
pub fn available_streams(rank: &str) -> &'static [StreamOption] {
    if rank_requires_stream(rank) {
        &A_LEVEL_STREAMS
    } else {
        &O_LEVEL_STREAMS
    }
}
