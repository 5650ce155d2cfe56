mod aggregation_tests;

pub mod utils;
