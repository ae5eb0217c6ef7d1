pub mod fake_database;
