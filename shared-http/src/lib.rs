//! Wire types shared by the API server and the console client.

pub mod api;
