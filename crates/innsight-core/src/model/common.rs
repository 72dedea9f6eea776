// ── Shared presentation metadata ──
//
// Presenters map a `Tone` to their own palette; the domain only decides
// which tone a severity or status carries.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Visual emphasis attached to a severity, status, or change direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Error,
    Warning,
    Info,
    Success,
    Neutral,
}
