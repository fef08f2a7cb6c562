use serde::{Deserialize, Serialize};

/// Display name used when the marker element carries no title.
pub const NAME_PLACEHOLDER: &str = "Sem Nome";

/// Address value meaning the venue has not been announced yet.
pub const ADDRESS_TBD: &str = "A definir";

/// Constant tag attached to every record for the downstream map.
pub const NOTES_TAG: &str = "Carnaval 2026";

/// A geocoded point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One Carnival street-block event as consumed by the map front end.
///
/// JSON keys are fixed by that consumer, hence the Portuguese renames.
/// All eight string fields are always present in the output; latitude and
/// longitude start at zero and are overwritten exactly once by the
/// geocoding stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bloco {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "horario")]
    pub time: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "observacoes")]
    pub notes: String,
    pub latitude: f64,
    pub longitude: f64,
}
