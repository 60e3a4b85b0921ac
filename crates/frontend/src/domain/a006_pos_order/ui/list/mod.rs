use crate::shared::list_page::filter_bar::FilterControl;
use crate::shared::list_page::RecordListPage;
use contracts::domain::a006_pos_order::aggregate::{PosOrder, PAYMENT_METHODS, POS_ORDER_STATUSES};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn PosOrderList() -> impl IntoView {
    view! {
        <RecordListPage<PosOrder>
            page_key="a006_pos_order"
            columns=&[
                "orderNumber",
                "customerName",
                "cashier",
                "orderDate",
                "paymentMethod",
                "subtotal",
                "taxAmount",
                "total",
                "status",
            ]
            filters=vec![
                FilterControl::search("customerName", "Search by customer..."),
                FilterControl::search("orderNumber", "Order No..."),
                FilterControl::choice("paymentMethod", "Payment", PAYMENT_METHODS),
                FilterControl::choice("status", "Status", POS_ORDER_STATUSES),
                FilterControl::date_range("orderDate", "Date"),
            ]
            totals=&["subtotal", "taxAmount", "total"]
        />
    }
}
