pub mod cash_flows;
pub mod deal;
pub mod loan;
pub mod report;
