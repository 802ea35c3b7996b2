use chrono::{DateTime, Utc};
use orb_billing_core::{model, tagged_union, CursorParams};

model! {
    /// Percent off every eligible line item.
    pub struct PercentageDiscount {
        /// Fraction off, between 0 and 1.
        required percentage_discount / set_percentage_discount: f64 = "percentage_discount";
        /// Price IDs the discount applies to.
        optional applies_to_price_ids / set_applies_to_price_ids: Vec<String> = "applies_to_price_ids";
        /// Free-form explanation shown on invoices.
        optional_nullable reason / set_reason: String = "reason";
    }
}

model! {
    /// Fixed amount off.
    pub struct AmountDiscount {
        /// Decimal amount in the invoice currency.
        required amount_discount / set_amount_discount: String = "amount_discount";
        /// Price IDs the discount applies to.
        optional applies_to_price_ids / set_applies_to_price_ids: Vec<String> = "applies_to_price_ids";
        /// Free-form explanation shown on invoices.
        optional_nullable reason / set_reason: String = "reason";
    }
}

model! {
    /// Usage units given away for free.
    pub struct UsageDiscount {
        /// Number of usage units discounted.
        required usage_discount / set_usage_discount: f64 = "usage_discount";
        /// Price IDs the discount applies to.
        optional applies_to_price_ids / set_applies_to_price_ids: Vec<String> = "applies_to_price_ids";
        /// Free-form explanation shown on invoices.
        optional_nullable reason / set_reason: String = "reason";
    }
}

tagged_union! {
    /// A coupon's discount, selected by `discount_type`.
    pub enum Discount {
        tag = "discount_type";
        /// `percentage`
        Percentage(PercentageDiscount) = "percentage",
        /// `amount`
        Amount(AmountDiscount) = "amount",
        /// `usage`
        Usage(UsageDiscount) = "usage",
    }
}

model! {
    /// A redeemable discount code.
    pub struct Coupon {
        /// Coupon ID.
        required id / set_id: String = "id";
        /// Code customers enter to redeem the coupon.
        required redemption_code / set_redemption_code: String = "redemption_code";
        /// The discount granted.
        required discount / set_discount: Discount = "discount";
        /// Times the coupon has been redeemed.
        required times_redeemed / set_times_redeemed: i64 = "times_redeemed";
        /// Months the discount lasts, `null` for forever.
        required_nullable duration_in_months / set_duration_in_months: i64 = "duration_in_months";
        /// Redemption limit, `null` for unlimited.
        required_nullable max_redemptions / set_max_redemptions: i64 = "max_redemptions";
        /// When the coupon was archived.
        optional_nullable archived_at / set_archived_at: DateTime<Utc> = "archived_at";
    }
}

model! {
    /// Body of `POST /coupons`.
    pub struct CouponCreateParams {
        /// The discount to grant.
        required discount / set_discount: Discount = "discount";
        /// Code customers enter to redeem the coupon.
        required redemption_code / set_redemption_code: String = "redemption_code";
        /// Months the discount lasts; send `null` for forever.
        optional_nullable duration_in_months / set_duration_in_months: i64 = "duration_in_months";
        /// Redemption limit; send `null` for unlimited.
        optional_nullable max_redemptions / set_max_redemptions: i64 = "max_redemptions";
    }
}

model! {
    /// Query of `GET /coupons`.
    pub struct CouponListParams {
        /// Cursor from the previous page.
        optional cursor / set_cursor: String = "cursor";
        /// Page size.
        optional limit / set_limit: i64 = "limit";
        /// Filter by redemption code.
        optional redemption_code / set_redemption_code: String = "redemption_code";
        /// Include archived coupons.
        optional show_archived / set_show_archived: bool = "show_archived";
    }
}

impl CursorParams for CouponListParams {}
