use thiserror::Error;

/// Errors surfaced by the calculator cores and the data catalog.
///
/// Only whole-input problems become errors. Missing optional request
/// fields (ability, item, nature) and unrecognized ability names degrade
/// silently inside the calculator instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Save buffer is smaller than the 128 KiB a Gen III image occupies.
    #[error("save file too small: {0} bytes (need at least 0x20000)")]
    InputTooSmall(usize),

    /// Neither save slot contains a sector with section id 1.
    #[error("no active save slot found")]
    NoActiveSlot,

    /// A slot was located but no record decoded to a valid species.
    #[error("no party entries found in save")]
    EmptyParty,

    /// A calculate request is missing a mandatory field.
    #[error("missing required field: {0}")]
    MissingRequired(&'static str),

    /// A catalog lookup for a mandatory name came back empty.
    #[error("unknown {kind}: {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unknown(kind: &'static str, name: &str) -> Self {
        Error::UnknownName {
            kind,
            name: name.to_string(),
        }
    }
}
