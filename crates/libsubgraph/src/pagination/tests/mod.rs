mod pagination_config_tests;
