pub mod approve;
pub mod audit;
pub mod replay;
pub mod resume;
pub mod run;
