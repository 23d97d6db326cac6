pub mod audit;
pub mod dispatch;
pub mod pages;
pub mod serve;
