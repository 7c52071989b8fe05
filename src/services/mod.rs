//! 服务模块

pub mod counselor;
pub mod earnings;
pub mod events;
pub mod session;

pub use counselor::{CounselorService, MessageReceipt, create_counselor_service};
pub use earnings::{BreakdownEntry, EarningsService, EarningsSummary, create_earnings_service};
pub use events::{EventBus, kinds, topic};
pub use session::{Pagination, SessionService, SessionStore, create_session_service};
