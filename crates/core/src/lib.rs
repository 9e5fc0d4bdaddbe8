pub mod issuer;
pub mod outcome;
pub mod owner;
pub mod period;
pub mod record;

pub use issuer::{Issuer, ParseIssuerError};
pub use outcome::UploadOutcome;
pub use owner::OwnerId;
pub use period::{ParsePeriodError, Period};
pub use record::{ExtractedRecord, SENTINEL};
