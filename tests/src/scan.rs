mod cancellation;
mod integration;
mod utils;
