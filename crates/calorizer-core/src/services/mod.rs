//! Record services: validate, persist, derive, reload, envelope.
//!
//! Services borrow the database and localizer for the duration of one
//! request. Store errors are logged here and never returned to callers of
//! mutating operations; they surface as a 400 envelope carrying one of the
//! [`keys`].

mod client;
mod clock;
mod lookup;
mod records;

pub use client::ClientService;
pub use clock::{Clock, ManualClock, SystemClock};
pub use lookup::LookupService;
pub use records::{ClientRecord, RecordService};

/// Message keys for operational failures.
pub mod keys {
    pub const CLIENT_NOT_FOUND: &str = "ClientNotFound";
    pub const ERROR_CREATING_CLIENT: &str = "ErrorCreatingClient";
    pub const ERROR_UPDATING_CLIENT: &str = "ErrorUpdatingClient";
    pub const ERROR_DELETING_CLIENT: &str = "ErrorDeletingClient";

    pub const ERROR_ADDING_WEIGHT_HISTORY: &str = "ErrorAddingWeightHistory";
    pub const ERROR_DELETING_WEIGHT_HISTORY: &str = "ErrorDeletingWeightHistory";
    pub const ERROR_ADDING_BIOCHEMICAL_TEST: &str = "ErrorAddingBiochemicalTest";
    pub const ERROR_DELETING_BIOCHEMICAL_TEST: &str = "ErrorDeletingBiochemicalTest";
    pub const ERROR_ADDING_DRUGS_SUPPLEMENT: &str = "ErrorAddingDrugsSupplement";
    pub const ERROR_DELETING_DRUGS_SUPPLEMENT: &str = "ErrorDeletingDrugsSupplement";
    pub const ERROR_ADDING_MEDICAL_HISTORY: &str = "ErrorAddingMedicalHistory";
    pub const ERROR_DELETING_MEDICAL_HISTORY: &str = "ErrorDeletingMedicalHistory";

    /// A request body or query that could not be read.
    pub const INVALID_REQUEST: &str = "InvalidRequest";
}
