mod expr_tests;
