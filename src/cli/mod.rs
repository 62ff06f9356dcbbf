pub mod run;
pub mod stack;
