use serde::Deserialize;

/// Form body of POST /generate_sieve. Kept as text so bad input gets a readable message.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub number: String,
}
