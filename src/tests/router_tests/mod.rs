mod admin_tests;
mod prediction_tests;
mod submission_tests;
