mod graph_tests;
