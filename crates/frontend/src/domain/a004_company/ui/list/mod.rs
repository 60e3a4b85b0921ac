use crate::shared::list_page::filter_bar::FilterControl;
use crate::shared::list_page::RecordListPage;
use contracts::domain::a004_company::aggregate::{Company, COMPANY_STATUSES};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn CompanyList() -> impl IntoView {
    view! {
        <RecordListPage<Company>
            page_key="a004_company"
            columns=&["name", "email", "phone", "planName", "registeredOn", "status"]
            filters=vec![
                FilterControl::search("name", "Search by name..."),
                FilterControl::search("email", "Email..."),
                FilterControl::choice("status", "Status", COMPANY_STATUSES),
            ]
        />
    }
}
