//! Page registry: the single place mapping a page key to its title, icon and view

use crate::domain::a001_coupon::ui::list::CouponList;
use crate::domain::a002_purchase_order::ui::list::PurchaseOrderList;
use crate::domain::a003_subscription::ui::list::SubscriptionList;
use crate::domain::a004_company::ui::list::CompanyList;
use crate::domain::a005_leave_request::ui::list::LeaveRequestList;
use crate::domain::a006_pos_order::ui::list::PosOrderList;
use contracts::domain::a001_coupon::aggregate::Coupon;
use contracts::domain::a002_purchase_order::aggregate::PurchaseOrder;
use contracts::domain::a003_subscription::aggregate::Subscription;
use contracts::domain::a004_company::aggregate::Company;
use contracts::domain::a005_leave_request::aggregate::LeaveRequest;
use contracts::domain::a006_pos_order::aggregate::PosOrder;
use contracts::shared::record::Record;
use leptos::prelude::*;

/// Page opened when the URL names none
pub const DEFAULT_PAGE: &str = "a001_coupon";

/// Navigation entry: (key, title, icon)
pub fn pages() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("a001_coupon", Coupon::list_name(), "tag"),
        ("a002_purchase_order", PurchaseOrder::list_name(), "shopping-cart"),
        ("a003_subscription", Subscription::list_name(), "repeat"),
        ("a004_company", Company::list_name(), "building"),
        ("a005_leave_request", LeaveRequest::list_name(), "calendar"),
        ("a006_pos_order", PosOrder::list_name(), "receipt"),
    ]
}

pub fn is_known_page(key: &str) -> bool {
    pages().iter().any(|(k, _, _)| *k == key)
}

/// View for a page key, or a placeholder for unknown keys
pub fn render_page(key: &str) -> AnyView {
    match key {
        "a001_coupon" => view! { <CouponList /> }.into_any(),
        "a002_purchase_order" => view! { <PurchaseOrderList /> }.into_any(),
        "a003_subscription" => view! { <SubscriptionList /> }.into_any(),
        "a004_company" => view! { <CompanyList /> }.into_any(),
        "a005_leave_request" => view! { <LeaveRequestList /> }.into_any(),
        "a006_pos_order" => view! { <PosOrderList /> }.into_any(),
        _ => {
            log::warn!("Unknown page: {}", key);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_are_unique_and_known() {
        let keys: Vec<_> = pages().into_iter().map(|(k, _, _)| k).collect();
        let mut deduped = keys.clone();
        deduped.dedup();
        assert_eq!(keys, deduped);
        assert!(is_known_page(DEFAULT_PAGE));
        assert!(keys.iter().all(|k| is_known_page(k)));
        assert!(!is_known_page("a999_missing"));
    }
}
