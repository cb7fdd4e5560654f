pub mod balance;
pub mod party;
pub mod transaction;
pub mod user;
pub mod workspace;

pub use balance::{PartyBalance, PartyDetail, PartyWithTotals, WorkspaceSummary};
pub use party::{Party, PartyType};
pub use transaction::{Direction, NewTransaction, Transaction, TransactionChanges};
pub use user::{User, UserProfile, UserRole, normalize_email};
pub use workspace::{MemberRole, Members, Membership, Workspace};
