mod entry_extractor_tests;
