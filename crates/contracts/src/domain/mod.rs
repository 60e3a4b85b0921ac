pub mod a001_coupon;
pub mod a002_purchase_order;
pub mod a003_subscription;
pub mod a004_company;
pub mod a005_leave_request;
pub mod a006_pos_order;
