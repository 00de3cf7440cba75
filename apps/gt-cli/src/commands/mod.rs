pub mod diagnose;
pub mod goal;
pub mod report;
