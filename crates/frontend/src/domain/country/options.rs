//! Country choices for the state filter, read from the countries endpoint.

use contracts::domain::country::Country;
use contracts::shared::list::{PARAM_LIMIT, PARAM_PAGE};
use contracts::shared::select::SelectOption;

use super::ENDPOINT;
use crate::shared::api::{ApiClient, ApiError};

/// Largest page the backend serves; enough for every country.
pub const OPTIONS_LIMIT: u32 = 100;

/// Countries as `(id, name)` options, sorted by name. Records without an id
/// cannot be filtered on and are skipped.
pub async fn load_country_options(client: &ApiClient) -> Result<Vec<SelectOption>, ApiError> {
    let params = vec![
        (PARAM_PAGE.to_string(), "1".to_string()),
        (PARAM_LIMIT.to_string(), OPTIONS_LIMIT.to_string()),
    ];
    let envelope = client.get_list(ENDPOINT, params).await?;
    let page = envelope
        .normalize::<Country>(OPTIONS_LIMIT)
        .map_err(|e| ApiError::server(e.to_string()))?;

    let mut options: Vec<SelectOption> = page
        .items
        .into_iter()
        .filter_map(|country| country.id.map(|id| SelectOption::new(id, country.name)))
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    log::debug!("loaded {} country options", options.len());
    Ok(options)
}
