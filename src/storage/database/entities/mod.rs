/// Per-group member balance
pub mod ledger_user;
/// Point change log
pub mod points_history;
/// Daily sign-in records
pub mod sign_record;

pub use ledger_user::Entity as LedgerUser;
pub use points_history::Entity as PointsHistory;
pub use sign_record::Entity as SignRecord;
