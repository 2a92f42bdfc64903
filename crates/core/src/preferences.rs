use crate::tier::Tier;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Any,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Any
    }
}

/// A region filter: either a specific region string, or `Any`, which
/// matches every candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Any,
    Named(String),
}

impl Default for Region {
    fn default() -> Self {
        Region::Any
    }
}

/// The wire sends `preferences.region` as a plain string (`"any"`, `"eu"`,
/// ...), not a tagged enum — an externally-tagged derive would only ever
/// decode the unit variant `"any"` and reject every concrete region as an
/// unknown variant. Serialize/deserialize it as a bare string instead.
impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Region::Any => serializer.serialize_str("any"),
            Region::Named(region) => serializer.serialize_str(region),
        }
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw.eq_ignore_ascii_case("any") {
            Region::Any
        } else {
            Region::Named(raw)
        })
    }
}

/// Matching preferences a session enqueues with. `Default` yields the
/// widest possible search (any gender, any region, own tier).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub gender: Gender,
    pub region: Region,
    pub tier: Tier,
}
