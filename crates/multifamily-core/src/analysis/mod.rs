//! Investment analysis engine: mortgage-financed purchase of an
//! income-producing property, from loan sizing through cash flow, equity
//! projection and an approximate IRR.

pub mod assumptions;
pub mod cash_flow;
pub mod engine;
pub mod equity;

pub use assumptions::LoanAssumptions;
pub use cash_flow::OperatingCashFlow;
pub use engine::{analyze_investment, InvestmentAnalysis, DEFAULT_HORIZON_YEARS};
pub use equity::EquityProjection;
