use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use orb_billing_core::{model, open_enum, untagged_union, CursorParams, OpenEnum};

use super::{Customer, Plan};

open_enum! {
    /// Lifecycle state of a subscription.
    pub enum SubscriptionStatus {
        /// Currently billing.
        Active = "active",
        /// Cancelled or past its end date.
        Ended = "ended",
        /// Starts in the future.
        Upcoming = "upcoming",
    }
}

open_enum! {
    /// When a cancellation takes effect.
    pub enum CancelOption {
        /// At the end of the current term.
        EndOfSubscriptionTerm = "end_of_subscription_term",
        /// Right away.
        Immediate = "immediate",
        /// On `cancellation_date`.
        RequestedDate = "requested_date",
    }
}

untagged_union! {
    /// Subscription start, as an instant or a calendar date.
    pub enum StartDate {
        /// RFC 3339 timestamp.
        Timestamp(DateTime<Utc>),
        /// `YYYY-MM-DD` date in the customer's time zone.
        Date(NaiveDate),
    }
}

model! {
    /// A customer's subscription to a plan.
    pub struct Subscription {
        /// Subscription ID.
        required id / set_id: String = "id";
        /// The subscribed customer.
        required customer / set_customer: Customer = "customer";
        /// The plan being billed.
        required plan / set_plan: Plan = "plan";
        /// Lifecycle state.
        required status / set_status: OpenEnum<SubscriptionStatus> = "status";
        /// When billing started.
        required start_date / set_start_date: DateTime<Utc> = "start_date";
        /// When billing ends, `null` if open-ended.
        required_nullable end_date / set_end_date: DateTime<Utc> = "end_date";
        /// Days until invoices are due.
        required net_terms / set_net_terms: i64 = "net_terms";
        /// Whether invoices are charged automatically.
        required auto_collection / set_auto_collection: bool = "auto_collection";
        /// Caller-defined metadata.
        required metadata / set_metadata: HashMap<String, String> = "metadata";
        /// Creation time.
        required created_at / set_created_at: DateTime<Utc> = "created_at";
    }
}

model! {
    /// Body of `POST /subscriptions`.
    ///
    /// Identify the customer by `customer_id` or `external_customer_id`, and
    /// the plan by `plan_id` or `external_plan_id`.
    pub struct SubscriptionCreateParams {
        /// Orb customer ID.
        optional customer_id / set_customer_id: String = "customer_id";
        /// The caller's customer ID.
        optional external_customer_id / set_external_customer_id: String = "external_customer_id";
        /// Orb plan ID.
        optional plan_id / set_plan_id: String = "plan_id";
        /// The caller's plan ID.
        optional external_plan_id / set_external_plan_id: String = "external_plan_id";
        /// When billing starts; defaults to now.
        optional start_date / set_start_date: StartDate = "start_date";
        /// Days until invoices are due; `null` uses the account default.
        optional_nullable net_terms / set_net_terms: i64 = "net_terms";
        /// Charge invoices automatically; `null` uses the customer default.
        optional_nullable auto_collection / set_auto_collection: bool = "auto_collection";
        /// Caller-defined metadata.
        optional_nullable metadata / set_metadata: HashMap<String, Option<String>> = "metadata";
    }
}

model! {
    /// Body of `POST /subscriptions/{id}/cancel`.
    pub struct SubscriptionCancelParams {
        /// When the cancellation takes effect.
        required cancel_option / set_cancel_option: OpenEnum<CancelOption> = "cancel_option";
        /// Effective date for [`CancelOption::RequestedDate`].
        optional_nullable cancellation_date / set_cancellation_date: DateTime<Utc> = "cancellation_date";
    }
}

model! {
    /// Query of `GET /subscriptions`.
    pub struct SubscriptionListParams {
        /// Cursor from the previous page.
        optional cursor / set_cursor: String = "cursor";
        /// Page size.
        optional limit / set_limit: i64 = "limit";
        /// Only subscriptions of these customers.
        optional customer_id / set_customer_id: Vec<String> = "customer_id";
        /// Filter by status.
        optional status / set_status: OpenEnum<SubscriptionStatus> = "status";
    }
}

impl CursorParams for SubscriptionListParams {}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_billing_core::{Model, ModelError, Variant};
    use serde_json::json;

    #[test]
    fn start_date_prefers_timestamp() {
        let params = SubscriptionCreateParams::from_json_str(
            r#"{"plan_id":"plan_1","start_date":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();
        let start = params.start_date().unwrap().unwrap();
        assert_eq!(start.variant_name(), "Timestamp");

        let params =
            SubscriptionCreateParams::from_json_str(r#"{"start_date":"2024-05-01"}"#).unwrap();
        let start = params.start_date().unwrap().unwrap();
        assert_eq!(
            start,
            StartDate::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
    }

    #[test]
    fn start_date_rejects_other_strings() {
        let params =
            SubscriptionCreateParams::from_json_str(r#"{"start_date":"next tuesday"}"#).unwrap();
        assert!(matches!(
            params.start_date(),
            Err(ModelError::InvalidField { field, .. }) if field == "start_date"
        ));
        assert_eq!(StartDate::matching_variants(&json!("next tuesday")), Vec::<&str>::new());
    }

    #[test]
    fn start_date_encodes_bare() {
        let mut params = SubscriptionCreateParams::new();
        params.set_customer_id(Some("cus_1".to_string())).unwrap();
        params
            .set_start_date(Some(StartDate::from(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())))
            .unwrap();
        params.set_net_terms(None).unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"customer_id": "cus_1", "start_date": "2024-05-01", "net_terms": null})
        );
    }

    #[test]
    fn cancel_params_accept_known_option() {
        let mut params = SubscriptionCancelParams::new();
        params.set_cancel_option(CancelOption::Immediate).unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"cancel_option": "immediate"})
        );
        assert_eq!(
            params.cancel_option().unwrap().known().unwrap(),
            CancelOption::Immediate
        );
    }
}
