pub mod filters;
pub mod frequency;
pub mod metric;
pub mod raw_record;
pub mod row;
pub mod station;
