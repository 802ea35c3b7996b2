use chrono::{DateTime, Utc};
use orb_billing_core::{model, open_enum, tagged_union, CursorParams, OpenEnum};

open_enum! {
    /// Lifecycle state of a plan.
    pub enum PlanStatus {
        /// Available for new subscriptions.
        Active = "active",
        /// No longer offered.
        Archived = "archived",
        /// Not yet published.
        Draft = "draft",
    }
}

open_enum! {
    /// How often a price is billed.
    pub enum Cadence {
        /// Once.
        OneTime = "one_time",
        /// Every month.
        Monthly = "monthly",
        /// Every three months.
        Quarterly = "quarterly",
        /// Every six months.
        SemiAnnual = "semi_annual",
        /// Every year.
        Annual = "annual",
        /// Custom interval.
        Custom = "custom",
    }
}

model! {
    /// Flat amount per unit.
    pub struct UnitConfig {
        /// Amount per unit as a decimal string.
        required unit_amount / set_unit_amount: String = "unit_amount";
    }
}

model! {
    /// Amount per package of units.
    pub struct PackageConfig {
        /// Amount per package as a decimal string.
        required package_amount / set_package_amount: String = "package_amount";
        /// Units per package.
        required package_size / set_package_size: i64 = "package_size";
    }
}

model! {
    /// One band of a tiered price.
    pub struct Tier {
        /// First unit covered by the tier.
        required first_unit / set_first_unit: f64 = "first_unit";
        /// Last unit covered, `null` for unbounded.
        required_nullable last_unit / set_last_unit: f64 = "last_unit";
        /// Amount per unit in this tier.
        required unit_amount / set_unit_amount: String = "unit_amount";
    }
}

model! {
    /// Tier bands, in ascending order.
    pub struct TieredConfig {
        /// The bands.
        required tiers / set_tiers: Vec<Tier> = "tiers";
    }
}

model! {
    /// A price billed per unit.
    pub struct UnitPrice {
        /// Price ID.
        required id / set_id: String = "id";
        /// Display name.
        required name / set_name: String = "name";
        /// Billing cadence.
        required cadence / set_cadence: OpenEnum<Cadence> = "cadence";
        /// Currency code.
        required currency / set_currency: String = "currency";
        /// Unit pricing.
        required unit_config / set_unit_config: UnitConfig = "unit_config";
    }
}

model! {
    /// A price billed per package of units.
    pub struct PackagePrice {
        /// Price ID.
        required id / set_id: String = "id";
        /// Display name.
        required name / set_name: String = "name";
        /// Billing cadence.
        required cadence / set_cadence: OpenEnum<Cadence> = "cadence";
        /// Currency code.
        required currency / set_currency: String = "currency";
        /// Package pricing.
        required package_config / set_package_config: PackageConfig = "package_config";
    }
}

model! {
    /// A price billed by usage tier.
    pub struct TieredPrice {
        /// Price ID.
        required id / set_id: String = "id";
        /// Display name.
        required name / set_name: String = "name";
        /// Billing cadence.
        required cadence / set_cadence: OpenEnum<Cadence> = "cadence";
        /// Currency code.
        required currency / set_currency: String = "currency";
        /// Tier bands.
        required tiered_config / set_tiered_config: TieredConfig = "tiered_config";
    }
}

tagged_union! {
    /// A plan price, selected by `model_type`.
    pub enum Price {
        tag = "model_type";
        /// `unit`
        Unit(UnitPrice) = "unit",
        /// `package`
        Package(PackagePrice) = "package",
        /// `tiered`
        Tiered(TieredPrice) = "tiered",
    }
}

impl Price {
    /// Price ID of whichever alternative is active.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is missing or not a string.
    pub fn id(&self) -> orb_billing_core::Result<String> {
        match self {
            Self::Unit(price) => price.id(),
            Self::Package(price) => price.id(),
            Self::Tiered(price) => price.id(),
        }
    }
}

model! {
    /// A set of prices customers subscribe to.
    pub struct Plan {
        /// Plan ID.
        required id / set_id: String = "id";
        /// Display name.
        required name / set_name: String = "name";
        /// Long description.
        required description / set_description: String = "description";
        /// Lifecycle state.
        required status / set_status: OpenEnum<PlanStatus> = "status";
        /// Currency code.
        required currency / set_currency: String = "currency";
        /// The caller's own ID for the plan.
        required_nullable external_plan_id / set_external_plan_id: String = "external_plan_id";
        /// Prices billed under the plan.
        required prices / set_prices: Vec<Price> = "prices";
        /// Creation time.
        required created_at / set_created_at: DateTime<Utc> = "created_at";
    }
}

model! {
    /// Query of `GET /plans`.
    pub struct PlanListParams {
        /// Cursor from the previous page.
        optional cursor / set_cursor: String = "cursor";
        /// Page size.
        optional limit / set_limit: i64 = "limit";
        /// Filter by status.
        optional status / set_status: OpenEnum<PlanStatus> = "status";
    }
}

impl CursorParams for PlanListParams {}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_billing_core::{ModelError, Validate, Variant};
    use serde_json::json;

    fn plan_json(prices: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "plan_1",
            "name": "Pro",
            "description": "",
            "status": "active",
            "currency": "USD",
            "external_plan_id": null,
            "prices": prices,
            "created_at": "2024-03-01T00:00:00Z"
        })
    }

    #[test]
    fn prices_decode_by_model_type() {
        let plan: Plan = serde_json::from_value(plan_json(json!([
            {
                "model_type": "unit", "id": "p_unit", "name": "Seats", "cadence": "monthly",
                "currency": "USD", "unit_config": {"unit_amount": "10.00"}
            },
            {
                "model_type": "tiered", "id": "p_tier", "name": "API calls", "cadence": "monthly",
                "currency": "USD",
                "tiered_config": {"tiers": [
                    {"first_unit": 0, "last_unit": 1000, "unit_amount": "0.00"},
                    {"first_unit": 1000, "last_unit": null, "unit_amount": "0.01"}
                ]}
            }
        ])))
        .unwrap();

        plan.validate().unwrap();
        let prices = plan.prices().unwrap();
        let kinds: Vec<_> = prices.iter().map(Variant::variant_name).collect();
        assert_eq!(kinds, ["Unit", "Tiered"]);
        assert_eq!(prices[1].id().unwrap(), "p_tier");

        let Price::Tiered(tiered) = &prices[1] else {
            panic!("expected tiered price");
        };
        let tiers = tiered.tiered_config().unwrap().tiers().unwrap();
        assert_eq!(tiers[1].last_unit().unwrap(), None);
    }

    #[test]
    fn unknown_price_model_fails_prices_read_only() {
        let plan: Plan = serde_json::from_value(plan_json(json!([
            {"model_type": "matrix", "id": "p_matrix"}
        ])))
        .unwrap();

        assert_eq!(plan.name().unwrap(), "Pro");
        assert!(matches!(plan.prices(), Err(ModelError::InvalidField { field, .. }) if field == "prices"));
        assert!(plan.validate().is_err());
    }

    #[test]
    fn unknown_cadence_is_preserved() {
        let price = Price::decode(&json!({
            "model_type": "unit", "id": "p1", "name": "Seats", "cadence": "biweekly",
            "currency": "USD", "unit_config": {"unit_amount": "1.00"}
        }))
        .unwrap();
        let Price::Unit(unit) = &price else {
            panic!("expected unit price");
        };
        assert_eq!(unit.cadence().unwrap().raw(), "biweekly");
        assert!(price.validate().is_err());
    }
}
