use serde::Deserialize;

// Providers answer `null` when they have no prediction for a name.

#[derive(Debug, Deserialize)]
pub struct AgeResponse {
    pub age: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct GenderResponse {
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NationalityResponse {
    pub country: Vec<CountryCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct CountryCandidate {
    pub country_id: String,
    #[allow(dead_code)]
    pub probability: f64,
}

impl NationalityResponse {
    /// Providers list candidates most-probable first.
    pub fn top_country(self) -> String {
        self.country
            .into_iter()
            .next()
            .map(|c| c.country_id)
            .unwrap_or_default()
    }
}
