use gloo_net::http::Request;
use riskmap_core::error::{Result, RiskMapError};
use riskmap_core::FeatureCollection;

/// One GET of the tract document. No retry, no timeout.
pub async fn fetch_collection(url: &str) -> Result<FeatureCollection> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| RiskMapError::Js(e.to_string()))?;

    if !resp.ok() {
        return Err(RiskMapError::Status(resp.status()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| RiskMapError::Js(e.to_string()))?;

    let tracts = FeatureCollection::from_json_str(&body)?;
    log::info!("fetched {} tracts from {url}", tracts.len());
    Ok(tracts)
}
