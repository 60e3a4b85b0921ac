use crate::shared::list_page::filter_bar::FilterControl;
use crate::shared::list_page::RecordListPage;
use contracts::domain::a003_subscription::aggregate::{
    Subscription, BILLING_CYCLES, PLANS, SUBSCRIPTION_STATUSES,
};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn SubscriptionList() -> impl IntoView {
    view! {
        <RecordListPage<Subscription>
            page_key="a003_subscription"
            columns=&[
                "companyName",
                "planName",
                "billingCycle",
                "amount",
                "startDate",
                "endDate",
                "status",
            ]
            filters=vec![
                FilterControl::search("companyName", "Search by company..."),
                FilterControl::choice("planName", "Plan", PLANS),
                FilterControl::choice("billingCycle", "Billing", BILLING_CYCLES),
                FilterControl::choice("status", "Status", SUBSCRIPTION_STATUSES),
            ]
            totals=&["amount"]
        />
    }
}
