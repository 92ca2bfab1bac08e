mod accounts;
mod auth_screen;
mod dashboard;
mod feedback;
mod icons;
mod layout;
mod transactions;

pub use accounts::AccountsPage;
pub use auth_screen::AuthScreen;
pub use dashboard::DashboardPage;
pub use feedback::{BusyOverlay, NoticeStack};
pub use layout::{Layout, Page};
pub use transactions::TransactionsPage;
