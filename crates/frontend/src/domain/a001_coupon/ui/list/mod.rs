use crate::shared::list_page::filter_bar::FilterControl;
use crate::shared::list_page::RecordListPage;
use contracts::domain::a001_coupon::aggregate::{Coupon, COUPON_STATUSES, DISCOUNT_TYPES};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn CouponList() -> impl IntoView {
    view! {
        <RecordListPage<Coupon>
            page_key="a001_coupon"
            columns=&[
                "couponCode",
                "description",
                "discountType",
                "discountAmount",
                "minPurchase",
                "startDate",
                "endDate",
                "status",
            ]
            filters=vec![
                FilterControl::search("couponCode", "Search by code..."),
                FilterControl::choice("discountType", "Type", DISCOUNT_TYPES),
                FilterControl::choice("status", "Status", COUPON_STATUSES),
                FilterControl::date_range("startDate", "Valid from"),
            ]
        />
    }
}
