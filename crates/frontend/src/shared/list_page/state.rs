use crate::shared::record_manager::{FilterSpec, TabularRecordManager};
use contracts::shared::record::Record;
use serde::{Deserialize, Serialize};

/// What a list page remembers while the user visits other pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListViewState {
    pub filters: FilterSpec,
    pub page_number: usize,
    pub page_size: usize,
}

impl ListViewState {
    pub fn capture<R: Record>(manager: &TabularRecordManager<R>) -> Self {
        let window = manager.window();
        Self {
            filters: manager.filters().clone(),
            page_number: window.page_number,
            page_size: window.page_size,
        }
    }

    /// Apply to a manager. Returns false when the saved page does not exist
    /// (yet), in which case the manager stays on its current page.
    pub fn restore<R: Record>(&self, manager: &mut TabularRecordManager<R>) -> bool {
        if self.page_size > 0 && manager.window().page_size != self.page_size {
            let _ = manager.set_page_size(self.page_size);
        }
        manager.set_filters(self.filters.clone());
        manager.go_to_page(self.page_number).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_leave_request::aggregate::LeaveRequest;

    fn leaves(n: i64) -> Vec<LeaveRequest> {
        (1..=n)
            .map(|id| LeaveRequest {
                id,
                employee_name: format!("Employee {id}"),
                ..LeaveRequest::default()
            })
            .collect()
    }

    #[test]
    fn test_state_survives_a_round_trip() {
        let mut source = TabularRecordManager::default().with_records(leaves(60));
        source.set_page_size(20).unwrap();
        source.set_filters(FilterSpec::new().contains("employeeName", "employee"));
        source.go_to_page(3).unwrap();

        let json = serde_json::to_value(ListViewState::capture(&source)).unwrap();
        let state: ListViewState = serde_json::from_value(json).unwrap();

        let mut target = TabularRecordManager::default().with_records(leaves(60));
        assert!(state.restore(&mut target));
        assert_eq!(target.window(), source.window());
        assert_eq!(target.filters(), source.filters());
    }

    #[test]
    fn test_restore_before_load_keeps_first_page() {
        let state = ListViewState {
            filters: FilterSpec::new(),
            page_number: 4,
            page_size: 10,
        };
        let mut empty = TabularRecordManager::<LeaveRequest>::default();
        assert!(!state.restore(&mut empty));
        assert_eq!(empty.window().page_number, 1);
    }
}
