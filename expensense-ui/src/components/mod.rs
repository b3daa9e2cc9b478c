//! UI Components
//!
//! Event glue for the expense forms and the dashboard chart.

pub mod chart;
pub mod loading;
pub mod notice;
pub mod receipt;
pub mod team_select;

pub use chart::{create_expense_chart, ExpenseChart};
pub use loading::{bind_busy, bind_loader};
pub use notice::ReceiptNotice;
