pub mod client_runtime;
