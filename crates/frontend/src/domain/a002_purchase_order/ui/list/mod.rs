use crate::shared::list_page::filter_bar::FilterControl;
use crate::shared::list_page::RecordListPage;
use contracts::domain::a002_purchase_order::aggregate::{PurchaseOrder, PURCHASE_ORDER_STATUSES};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn PurchaseOrderList() -> impl IntoView {
    view! {
        <RecordListPage<PurchaseOrder>
            page_key="a002_purchase_order"
            columns=&[
                "orderNumber",
                "supplierName",
                "productName",
                "orderDate",
                "expectedDate",
                "quantity",
                "unitPrice",
                "total",
                "status",
            ]
            filters=vec![
                FilterControl::search("supplierName", "Search by supplier..."),
                FilterControl::search("orderNumber", "Order No..."),
                FilterControl::choice("status", "Status", PURCHASE_ORDER_STATUSES),
                FilterControl::date_range("orderDate", "Order date"),
            ]
            totals=&["quantity", "total"]
        />
    }
}
