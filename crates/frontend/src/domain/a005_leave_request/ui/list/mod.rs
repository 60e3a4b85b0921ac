use crate::shared::list_page::filter_bar::FilterControl;
use crate::shared::list_page::RecordListPage;
use contracts::domain::a005_leave_request::aggregate::{LeaveRequest, LEAVE_STATUSES, LEAVE_TYPES};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn LeaveRequestList() -> impl IntoView {
    view! {
        <RecordListPage<LeaveRequest>
            page_key="a005_leave_request"
            columns=&[
                "employeeName",
                "department",
                "leaveType",
                "fromDate",
                "toDate",
                "days",
                "status",
            ]
            filters=vec![
                FilterControl::search("employeeName", "Search by employee..."),
                FilterControl::choice("leaveType", "Leave type", LEAVE_TYPES),
                FilterControl::choice("status", "Status", LEAVE_STATUSES),
                FilterControl::date_range("fromDate", "From"),
            ]
            totals=&["days"]
        />
    }
}
