pub mod test_case_generation;
