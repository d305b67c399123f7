//! HTTP API module for the Agency Cost Engine.
//!
//! This module provides the REST API endpoints for employee cost
//! breakdowns, team cost reports, project estimates and offer drafts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssetRecord, EmployeeCostRequest, EmployeeRecord, EstimateRequestBody, HolidayRecord,
    OverheadCostRecord, SelectedServiceRecord, ServiceRecord, SnapshotRequest,
    StaffAssignmentRecord, TeamCostRequest,
};
pub use response::{
    ApiError, ENGINE_VERSION, EmployeeCostReport, EstimateReport, OfferDraft, TeamCostReport,
};
pub use state::AppState;
