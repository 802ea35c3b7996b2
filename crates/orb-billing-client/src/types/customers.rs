use std::collections::HashMap;

use chrono::{DateTime, Utc};
use orb_billing_core::{model, open_enum, CursorParams, OpenEnum};

open_enum! {
    /// External system that collects payment for a customer.
    pub enum PaymentProvider {
        /// Quickbooks.
        Quickbooks = "quickbooks",
        /// Bill.com.
        BillCom = "bill.com",
        /// Stripe charges.
        StripeCharge = "stripe_charge",
        /// Stripe invoices.
        StripeInvoice = "stripe_invoice",
        /// Netsuite.
        Netsuite = "netsuite",
    }
}

model! {
    /// Postal address.
    pub struct Address {
        /// First address line.
        required_nullable line1 / set_line1: String = "line1";
        /// Second address line.
        required_nullable line2 / set_line2: String = "line2";
        /// City.
        required_nullable city / set_city: String = "city";
        /// State or region.
        required_nullable state / set_state: String = "state";
        /// Postal code.
        required_nullable postal_code / set_postal_code: String = "postal_code";
        /// Two-letter country code.
        required_nullable country / set_country: String = "country";
    }
}

model! {
    /// A billable customer.
    pub struct Customer {
        /// Orb customer ID.
        required id / set_id: String = "id";
        /// The caller's own ID for the customer.
        required_nullable external_customer_id / set_external_customer_id: String = "external_customer_id";
        /// Display name.
        required name / set_name: String = "name";
        /// Billing email.
        required email / set_email: String = "email";
        /// Invoice currency, `null` until the first subscription.
        required_nullable currency / set_currency: String = "currency";
        /// Credit balance as a decimal string.
        required balance / set_balance: String = "balance";
        /// IANA time zone used for billing dates.
        required timezone / set_timezone: String = "timezone";
        /// Payment provider, if any.
        required_nullable payment_provider / set_payment_provider: OpenEnum<PaymentProvider> = "payment_provider";
        /// Customer ID in the payment provider.
        required_nullable payment_provider_id / set_payment_provider_id: String = "payment_provider_id";
        /// Billing address.
        required_nullable billing_address / set_billing_address: Address = "billing_address";
        /// Shipping address.
        required_nullable shipping_address / set_shipping_address: Address = "shipping_address";
        /// Caller-defined metadata.
        required metadata / set_metadata: HashMap<String, String> = "metadata";
        /// Creation time.
        required created_at / set_created_at: DateTime<Utc> = "created_at";
    }
}

model! {
    /// Body of `POST /customers`.
    pub struct CustomerCreateParams {
        /// Billing email.
        required email / set_email: String = "email";
        /// Display name.
        required name / set_name: String = "name";
        /// The caller's own ID for the customer.
        optional_nullable external_customer_id / set_external_customer_id: String = "external_customer_id";
        /// Invoice currency.
        optional_nullable currency / set_currency: String = "currency";
        /// IANA time zone.
        optional_nullable timezone / set_timezone: String = "timezone";
        /// Payment provider.
        optional_nullable payment_provider / set_payment_provider: OpenEnum<PaymentProvider> = "payment_provider";
        /// Customer ID in the payment provider.
        optional_nullable payment_provider_id / set_payment_provider_id: String = "payment_provider_id";
        /// Billing address.
        optional_nullable billing_address / set_billing_address: Address = "billing_address";
        /// Caller-defined metadata; `null` values delete keys.
        optional_nullable metadata / set_metadata: HashMap<String, Option<String>> = "metadata";
    }
}

model! {
    /// Body of `PUT /customers/{id}`. Unset fields are left unchanged.
    pub struct CustomerUpdateParams {
        /// Billing email.
        optional_nullable email / set_email: String = "email";
        /// Display name.
        optional_nullable name / set_name: String = "name";
        /// Payment provider.
        optional_nullable payment_provider / set_payment_provider: OpenEnum<PaymentProvider> = "payment_provider";
        /// Customer ID in the payment provider.
        optional_nullable payment_provider_id / set_payment_provider_id: String = "payment_provider_id";
        /// Billing address.
        optional_nullable billing_address / set_billing_address: Address = "billing_address";
        /// Caller-defined metadata; `null` values delete keys.
        optional_nullable metadata / set_metadata: HashMap<String, Option<String>> = "metadata";
    }
}

model! {
    /// Query of `GET /customers`.
    pub struct CustomerListParams {
        /// Cursor from the previous page.
        optional cursor / set_cursor: String = "cursor";
        /// Page size.
        optional limit / set_limit: i64 = "limit";
        /// Only customers created at or after this time.
        optional created_at_gte / set_created_at_gte: DateTime<Utc> = "created_at[gte]";
        /// Only customers created before this time.
        optional created_at_lt / set_created_at_lt: DateTime<Utc> = "created_at[lt]";
    }
}

impl CursorParams for CustomerListParams {}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_billing_core::{Model, ModelError, Validate};
    use serde_json::json;

    fn customer_json() -> serde_json::Value {
        json!({
            "id": "cus_1",
            "external_customer_id": null,
            "name": "Acme",
            "email": "billing@acme.test",
            "currency": "USD",
            "balance": "0.00",
            "timezone": "Etc/UTC",
            "payment_provider": "stripe_charge",
            "payment_provider_id": "cus_stripe",
            "billing_address": null,
            "shipping_address": {
                "line1": "1 Main St", "line2": null, "city": "Springfield",
                "state": null, "postal_code": "12345", "country": "US"
            },
            "metadata": {"tier": "gold"},
            "created_at": "2024-01-01T00:00:00Z",
            "portal_url": "https://portal.test/cus_1"
        })
    }

    #[test]
    fn full_customer_validates() {
        let customer: Customer = serde_json::from_value(customer_json()).unwrap();
        customer.validate().unwrap();
        assert_eq!(
            customer.payment_provider().unwrap().unwrap().known().unwrap(),
            PaymentProvider::StripeCharge
        );
        assert_eq!(customer.shipping_address().unwrap().unwrap().line2().unwrap(), None);
        assert_eq!(customer.metadata().unwrap()["tier"], "gold");
    }

    #[test]
    fn unknown_provider_round_trips_but_fails_validation() {
        let mut value = customer_json();
        value["payment_provider"] = json!("paddle");
        let customer: Customer = serde_json::from_value(value.clone()).unwrap();

        let provider = customer.payment_provider().unwrap().unwrap();
        assert_eq!(provider.raw(), "paddle");
        assert!(!provider.is_known());
        assert!(matches!(
            customer.validate(),
            Err(ModelError::UnrecognizedEnumValue { enum_name: "PaymentProvider", .. })
        ));
        assert_eq!(serde_json::to_value(&customer).unwrap(), value);
    }

    #[test]
    fn update_params_distinguish_clear_from_unchanged() {
        let mut params = CustomerUpdateParams::new();
        params.set_payment_provider(None).unwrap();
        params
            .set_metadata(Some(HashMap::from([("tier".to_string(), None)])))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"payment_provider": null, "metadata": {"tier": null}})
        );
        assert!(!params.has("email"));
    }

    #[test]
    fn list_params_use_bracketed_filter_keys() {
        let mut params = CustomerListParams::new();
        let since = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        params.set_created_at_gte(Some(since)).unwrap();
        assert!(params.has("created_at[gte]"));
        assert_eq!(params.created_at_gte().unwrap(), Some(since));
    }
}
