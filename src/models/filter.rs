use serde::{Deserialize, Serialize};

/// Default result-size cap when the caller does not ask for one.
pub const DEFAULT_LISTING_LIMIT: u32 = 1000;

/// Hard cap enforced by the listing endpoint.
pub const MAX_LISTING_LIMIT: u32 = 5000;

/// Whether one neighbourhood is the active filter dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "neighbourhood", rename_all = "camelCase")]
pub enum ViewScope {
    #[default]
    Unscoped,
    Scoped(String),
}

impl ViewScope {
    pub fn neighbourhood(&self) -> Option<&str> {
        match self {
            ViewScope::Unscoped => None,
            ViewScope::Scoped(name) => Some(name),
        }
    }
}

/// What the dashboard is currently looking at. Values are replaced wholesale on
/// every filter action; the controller never edits one in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl FilterCriteria {
    /// The "whole city" criteria used on startup and after a reset.
    pub fn unscoped() -> Self {
        Self::default()
    }

    pub fn for_neighbourhood(name: impl Into<String>) -> Self {
        Self {
            neighbourhood: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns a copy with blank strings removed, inverted or non-finite price
    /// bounds dropped and the limit clamped to `[1, max_limit]`.
    pub fn normalized(&self, default_limit: u32, max_limit: u32) -> Self {
        let mut min_price = self.min_price.filter(|v| v.is_finite() && *v >= 0.0);
        let mut max_price = self.max_price.filter(|v| v.is_finite() && *v >= 0.0);

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                min_price = None;
                max_price = None;
            }
        }

        let max_limit = max_limit.max(1);
        let limit = match self.limit {
            Some(0) | None => default_limit.clamp(1, max_limit),
            Some(limit) => limit.min(max_limit),
        };

        Self {
            min_price,
            max_price,
            room_type: non_blank(self.room_type.as_deref()),
            neighbourhood: non_blank(self.neighbourhood.as_deref()),
            limit: Some(limit),
        }
    }

    pub fn selected_neighbourhood(&self) -> Option<&str> {
        self.neighbourhood
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn scope(&self) -> ViewScope {
        match self.selected_neighbourhood() {
            Some(name) => ViewScope::Scoped(name.to_string()),
            None => ViewScope::Unscoped,
        }
    }

    /// Query pairs for the listing endpoint. Absent fields are omitted so the
    /// server applies no constraint for them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(room_type) = non_blank(self.room_type.as_deref()) {
            pairs.push(("room_type", room_type));
        }
        if let Some(neighbourhood) = self.selected_neighbourhood() {
            pairs.push(("neighbourhood", neighbourhood.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
