mod evaluator_tests;
mod resolution_plan_tests;
