pub mod use_cases;

pub use use_cases::test_case_generation::TestCaseGenerationUseCase;
