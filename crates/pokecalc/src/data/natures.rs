use serde::Deserialize;

use crate::stats::Stat;

/// Integer nature multipliers, applied as `stat * m / 10`.
pub const NATURE_PLUS: i32 = 11;
pub const NATURE_NEUTRAL: i32 = 10;
pub const NATURE_MINUS: i32 = 9;

/// One nature entry. Neutral natures carry neither a plus nor a minus.
#[derive(Clone, Debug, Deserialize)]
pub struct Nature {
    pub name: String,
    #[serde(default)]
    pub plus: Option<Stat>,
    #[serde(default)]
    pub minus: Option<Stat>,
}

impl Nature {
    pub fn is_neutral(&self) -> bool {
        self.plus.is_none() && self.minus.is_none()
    }

    /// Integer modifier for a stat: 11, 10, or 9 (over 10).
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        if self.plus == Some(stat) {
            NATURE_PLUS
        } else if self.minus == Some(stat) {
            NATURE_MINUS
        } else {
            NATURE_NEUTRAL
        }
    }
}
