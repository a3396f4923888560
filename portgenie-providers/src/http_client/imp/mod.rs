pub mod reqwest_client;
