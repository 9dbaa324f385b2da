mod history_round_trip_tests;
