use thiserror::Error;

#[derive(Debug, Error)]
pub enum MfmaError {
    #[error("Failed to read launch config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid launch config: {0}")]
    InvalidConfig(String),

    #[error("Lane {lane} out of range for a subgroup of {lanes} lanes")]
    LaneOutOfRange { lane: usize, lanes: usize },

    #[error("Lane {lane} arrived twice at the barrier in cycle {generation}")]
    DuplicateArrival { lane: usize, generation: u64 },

    #[error("Staging slot {slot} published {found} time(s), expected {expected}")]
    PublishMismatch {
        slot: usize,
        expected: u32,
        found: u32,
    },

    #[error("Lane {lane} panicked before completing the instruction")]
    LanePanicked { lane: usize },

    #[error("Result mismatch at lane {lane}, element {element}: {got} vs {expected}")]
    Mismatch {
        lane: usize,
        element: usize,
        got: f32,
        expected: f32,
    },
}
