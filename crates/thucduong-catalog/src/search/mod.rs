//! Search module.
//!
//! Contains filter planning, predicates, result assembly and pagination.

mod assembler;
mod planner;
mod predicate;
mod request;
mod results;

pub(crate) use assembler::admit;
pub use assembler::Assembler;
pub use planner::{
    FilterPlanner, NormalizedFilters, PageWindow, SearchPlan, DEFAULT_PAGE_SIZE,
};
pub use predicate::{Clause, Predicate};
pub use request::{FilterRequest, SortDirection, SortField, SortSpec};
pub use results::{AvailableFilters, EnrichedProduct, Pagination, ResultPage};
