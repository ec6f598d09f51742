//! Trigger kinds and trigger sets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TriggerSignal;
use crate::error::OverlayError;

/// Interaction kinds that can drive an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Pointer click toggles the overlay
    Click,
    /// Pointer enter shows, pointer leave hides
    Hover,
    /// Focus shows, blur hides
    Focus,
    /// The caller drives visibility; no handlers are installed
    Manual,
}

impl TriggerKind {
    /// Concrete signals this kind listens for
    pub fn signals(&self) -> &'static [TriggerSignal] {
        match self {
            TriggerKind::Click => &[TriggerSignal::Click],
            TriggerKind::Hover => &[TriggerSignal::PointerEnter, TriggerSignal::PointerLeave],
            TriggerKind::Focus => &[TriggerSignal::Focus, TriggerSignal::Blur],
            TriggerKind::Manual => &[],
        }
    }

    /// Get kind name
    pub fn name(&self) -> &'static str {
        match self {
            TriggerKind::Click => "click",
            TriggerKind::Hover => "hover",
            TriggerKind::Focus => "focus",
            TriggerKind::Manual => "manual",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TriggerKind {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "click" => Ok(TriggerKind::Click),
            "hover" => Ok(TriggerKind::Hover),
            "focus" => Ok(TriggerKind::Focus),
            "manual" => Ok(TriggerKind::Manual),
            other => Err(OverlayError::InvalidTrigger(other.to_string())),
        }
    }
}

/// Serialized shape of a trigger: one name, or a list of names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerSpec {
    One(String),
    Many(Vec<String>),
}

/// One or more trigger kinds, deduplicated, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TriggerSpec", into = "TriggerSpec")]
pub struct TriggerSet {
    kinds: Vec<TriggerKind>,
}

impl TriggerSet {
    /// A set holding exactly one kind
    pub fn single(kind: TriggerKind) -> Self {
        Self { kinds: vec![kind] }
    }

    /// Build a set from several kinds; duplicates are dropped
    pub fn new(kinds: impl IntoIterator<Item = TriggerKind>) -> Result<Self, OverlayError> {
        let mut set = Self { kinds: Vec::new() };
        for kind in kinds {
            if !set.kinds.contains(&kind) {
                set.kinds.push(kind);
            }
        }
        if set.kinds.is_empty() {
            return Err(OverlayError::EmptyTrigger);
        }
        Ok(set)
    }

    pub fn contains(&self, kind: TriggerKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// True when the set names the manual kind
    pub fn is_manual(&self) -> bool {
        self.contains(TriggerKind::Manual)
    }

    pub fn iter(&self) -> impl Iterator<Item = TriggerKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for TriggerSet {
    fn default() -> Self {
        Self::single(TriggerKind::Hover)
    }
}

impl From<TriggerKind> for TriggerSet {
    fn from(kind: TriggerKind) -> Self {
        Self::single(kind)
    }
}

impl fmt::Display for TriggerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.kinds.iter().map(TriggerKind::name).collect();
        f.write_str(&names.join(","))
    }
}

/// Accepts `click`, `click,hover` or `click|focus`
impl FromStr for TriggerSet {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kinds = s
            .split(|c| c == ',' || c == '|')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<TriggerKind>, _>>()?;
        Self::new(kinds)
    }
}

impl TryFrom<TriggerSpec> for TriggerSet {
    type Error = OverlayError;

    fn try_from(spec: TriggerSpec) -> Result<Self, Self::Error> {
        match spec {
            TriggerSpec::One(name) => name.parse(),
            TriggerSpec::Many(names) => {
                let kinds = names
                    .iter()
                    .map(|name| name.parse())
                    .collect::<Result<Vec<TriggerKind>, _>>()?;
                Self::new(kinds)
            }
        }
    }
}

impl From<TriggerSet> for TriggerSpec {
    fn from(set: TriggerSet) -> Self {
        match set.kinds.as_slice() {
            [one] => TriggerSpec::One(one.name().to_string()),
            many => TriggerSpec::Many(many.iter().map(|k| k.name().to_string()).collect()),
        }
    }
}
