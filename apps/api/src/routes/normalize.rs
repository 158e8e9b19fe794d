//! # Normalize Endpoint
//!
//! Runs the size normalizer and unit price calculator on a single value pair
//! without storing anything. Useful for checking how a label will be read.
//!
//! ```text
//! POST /normalize  {"size": "16 oz", "price": 2.49}
//!   ◄── {"size": "16 oz", "price": 2.49,
//!        "normalized_size_ml": 473.176, "unit_price_per_ml": 0.005262...}
//! ```

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use shrinkshield_core::{normalize_size, unit_price_per_ml};

use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub size: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub size: Option<String>,
    pub price: Option<f64>,
    pub normalized_size_ml: Option<f64>,
    pub unit_price_per_ml: Option<f64>,
}

/// `POST /normalize`
pub async fn normalize(
    body: Result<Json<NormalizeRequest>, JsonRejection>,
) -> ApiResult<Json<NormalizeResponse>> {
    let Json(request) = body?;

    let normalized = normalize_size(request.size.as_deref());
    let unit_price = unit_price_per_ml(normalized, request.price);

    Ok(Json(NormalizeResponse {
        normalized_size_ml: normalized.map(|ml| ml.value()),
        unit_price_per_ml: unit_price,
        size: request.size,
        price: request.price,
    }))
}
