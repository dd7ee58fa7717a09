mod live_view_tests;
