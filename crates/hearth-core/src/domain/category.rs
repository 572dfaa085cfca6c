use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// The six monthly metric categories served by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "listings")]
    Listings,
    #[serde(rename = "prices")]
    PriceTrends,
    #[serde(rename = "ratio")]
    ListPriceRatio,
    #[serde(rename = "dom")]
    DaysOnMarket,
    #[serde(rename = "inventory")]
    MonthsOfInventory,
    #[serde(rename = "volume")]
    Volume,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Listings,
        Self::PriceTrends,
        Self::ListPriceRatio,
        Self::DaysOnMarket,
        Self::MonthsOfInventory,
        Self::Volume,
    ];

    /// Route/CLI segment for this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listings => "listings",
            Self::PriceTrends => "prices",
            Self::ListPriceRatio => "ratio",
            Self::DaysOnMarket => "dom",
            Self::MonthsOfInventory => "inventory",
            Self::Volume => "volume",
        }
    }

    /// Warehouse table holding this category's records.
    pub const fn table(self) -> &'static str {
        match self {
            Self::Listings => "listings",
            Self::PriceTrends => "price_trends",
            Self::ListPriceRatio => "list_price_ratio",
            Self::DaysOnMarket => "days_on_market",
            Self::MonthsOfInventory => "months_of_inventory",
            Self::Volume => "volume",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "listings" => Ok(Self::Listings),
            "prices" => Ok(Self::PriceTrends),
            "ratio" => Ok(Self::ListPriceRatio),
            "dom" => Ok(Self::DaysOnMarket),
            "inventory" => Ok(Self::MonthsOfInventory),
            "volume" => Ok(Self::Volume),
            other => Err(ValidationError::UnknownCategory {
                value: other.to_owned(),
            }),
        }
    }
}
