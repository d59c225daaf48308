//! Allow-listed chat model identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of the model selected when nothing else is configured.
pub const DEFAULT_MODEL: ModelId = ModelId::Gpt4o;

/// Models the settings form offers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ModelId {
    /// `gpt-4o`
    #[default]
    Gpt4o,
    /// `gpt-4`
    Gpt4,
    /// `gpt-4-turbo`
    Gpt4Turbo,
    /// `gpt-3.5-turbo`
    Gpt35Turbo,
    /// `gpt-4o-mini`
    Gpt4oMini,
}

impl ModelId {
    /// Every allow-listed model, in display order.
    pub const ALL: [Self; 5] = [
        Self::Gpt4o,
        Self::Gpt4,
        Self::Gpt4Turbo,
        Self::Gpt35Turbo,
        Self::Gpt4oMini,
    ];

    /// Wire identifier sent to the provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4 => "gpt-4",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4oMini => "gpt-4o-mini",
        }
    }

    /// Human-readable label for select inputs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gpt4o => "GPT-4o (Latest)",
            Self::Gpt4 => "GPT-4",
            Self::Gpt4Turbo => "GPT-4 Turbo",
            Self::Gpt35Turbo => "GPT-3.5 Turbo",
            Self::Gpt4oMini => "GPT-4o Mini",
        }
    }

    /// Exact, case-sensitive lookup against the allow-list.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.as_str() == value)
    }

    /// Returns true when `value` names an allow-listed model.
    #[must_use]
    pub fn is_allowed(value: &str) -> bool {
        Self::parse(value).is_some()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for ModelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported model `{raw}`")))
    }
}
