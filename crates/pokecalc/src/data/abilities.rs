use serde::Deserialize;

/// One ability entry. The catalog stores display data only; the damage
/// pipeline consumes abilities as capability tags resolved at bind time.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
}
