//! Domain layer - Pure business logic.

pub mod caption;
pub mod catalog;
pub mod outcome;
pub mod work_item;
